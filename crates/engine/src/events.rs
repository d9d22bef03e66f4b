//! Event types for session change notifications.
//!
//! A session publishes these to its subscribers after every dispatch that
//! changed something, so renderers can redraw without polling. The test
//! harness collects them to check ordering and revision boundaries.

use serde::Serialize;

use ideagrid_core::{Coord, SelectionRect};

use crate::mode::EditMode;

/// Events emitted by a session, in this order within one dispatch:
/// `RevisionChanged`, `CellsChanged` (only if the sheet changed),
/// `EditorChanged`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Revision number changed. Emitted exactly once per effective dispatch.
    RevisionChanged(RevisionChangedEvent),

    /// Sheet cells were written or cleared.
    /// Always tagged with the revision that produced the changes.
    CellsChanged(CellsChangedEvent),

    /// Editor state or zoom after the dispatch.
    EditorChanged(EditorSnapshot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevisionChangedEvent {
    pub revision: u64,
    pub previous: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellsChangedEvent {
    /// Revision that produced these changes.
    pub revision: u64,
    /// Positions written or cleared, column-major.
    pub cells: Vec<Coord>,
}

/// What a renderer needs besides the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditorSnapshot {
    pub revision: u64,
    pub cursor: Coord,
    pub selection: Option<SelectionRect>,
    pub yanked: Option<SelectionRect>,
    pub mode: EditMode,
    pub extend: bool,
    pub zoom: u32,
}

/// Callback type for receiving session events.
pub type EventCallback = Box<dyn FnMut(&SessionEvent)>;

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<SessionEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn revision_changed(&self) -> Vec<&RevisionChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::RevisionChanged(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn cells_changed(&self) -> Vec<&CellsChangedEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::CellsChanged(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn editor_changed(&self) -> Vec<&EditorSnapshot> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::EditorChanged(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Most recent snapshot, if any dispatch published one.
    pub fn last_snapshot(&self) -> Option<&EditorSnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            SessionEvent::EditorChanged(s) => Some(s),
            _ => None,
        })
    }
}
