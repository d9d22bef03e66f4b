//! Test harness for sessions with event tracking.
//!
//! `SessionHarness` wraps a [`Session`] that:
//! - records every published event in an [`EventCollector`]
//! - replays scripted actions by name
//!
//! Use it to check publication invariants without a renderer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::Action;
use crate::events::{EventCollector, SessionEvent};
use crate::session::Session;
use crate::sheet::Sheet;

pub struct SessionHarness {
    session: Session,
    events: Rc<RefCell<EventCollector>>,
}

impl SessionHarness {
    pub fn new() -> Self {
        Self::with_sheet(Sheet::new())
    }

    pub fn with_sheet(sheet: Sheet) -> Self {
        Self::with_session(Session::new(sheet))
    }

    pub fn with_session(mut session: Session) -> Self {
        let events = Rc::new(RefCell::new(EventCollector::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |e: &SessionEvent| sink.borrow_mut().push(e.clone()));
        Self { session, events }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn events(&self) -> std::cell::Ref<'_, EventCollector> {
        self.events.borrow()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// Dispatch actions given by name. Returns how many changed something.
    ///
    /// Panics on an unknown name; scripts here are test fixtures.
    pub fn run(&mut self, script: &[&str]) -> usize {
        script
            .iter()
            .map(|name| {
                let action: Action = name
                    .parse()
                    .unwrap_or_else(|e| panic!("bad script entry {name:?}: {e}"));
                self.session.dispatch(action)
            })
            .filter(|&changed| changed)
            .count()
    }
}

impl Default for SessionHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::mode::EditMode;
    use ideagrid_core::{Coord, SelectionRect};

    #[test]
    fn test_harness_basic_run() {
        let mut harness = SessionHarness::new();
        assert_eq!(harness.run(&["begin-select", "right", "exit"]), 3);

        let snapshot = harness.session().snapshot();
        assert_eq!(snapshot.mode, EditMode::Normal);
        assert_eq!(snapshot.cursor, Coord::new(1, 0));
        assert_eq!(snapshot.selection, Some(SelectionRect::new(1, 1, 0, 0)));
        assert_eq!(snapshot.revision, 3);
    }

    #[test]
    fn test_one_revision_event_per_effective_dispatch() {
        let mut harness = SessionHarness::new();
        let changed = harness.run(&["confirm", "begin-select", "delete", "move", "confirm"]);

        let events = harness.events();
        assert_eq!(events.revision_changed().len(), changed);

        // Revisions are consecutive
        for (i, r) in events.revision_changed().iter().enumerate() {
            assert_eq!(r.previous, i as u64);
            assert_eq!(r.revision, i as u64 + 1);
        }
    }

    #[test]
    fn test_cells_changed_tagged_with_its_revision() {
        let sheet: Sheet = [(Coord::new(0, 0), Cell::idea("seed"))].into_iter().collect();
        let mut harness = SessionHarness::with_sheet(sheet);
        harness.run(&["begin-select", "move", "down", "down", "confirm"]);

        let events = harness.events();
        let cells = events.cells_changed();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].revision, harness.session().revision());
        assert_eq!(cells[0].cells, vec![Coord::new(0, 2)]);
    }

    #[test]
    fn test_event_order_within_dispatch() {
        let sheet: Sheet = [(Coord::new(0, 0), Cell::idea("a"))].into_iter().collect();
        let mut harness = SessionHarness::with_sheet(sheet);
        harness.run(&["begin-select"]);
        harness.clear_events();

        harness.run(&["delete"]);
        let events = harness.events();
        assert!(matches!(events.events()[0], SessionEvent::RevisionChanged(_)));
        assert!(matches!(events.events()[1], SessionEvent::CellsChanged(_)));
        assert!(matches!(events.events()[2], SessionEvent::EditorChanged(_)));
        assert_eq!(events.len(), 3);
    }
}
