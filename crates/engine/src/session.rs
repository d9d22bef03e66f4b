//! A live editing session: one sheet, one editor, zoom and subscribers.
//!
//! All mutation goes through [`Session::dispatch`] (or [`Session::set_cell`]
//! for payload writes). A dispatch computes the editor transition, applies its
//! sheet effect, swaps in the new state, bumps the revision and publishes
//! events, in that order. Dispatches that change nothing publish nothing.

use ideagrid_core::Coord;

use crate::action::{Action, ButtonEvent};
use crate::cell::Cell;
use crate::editor::{EditorState, SheetEffect, Transition};
use crate::events::{
    CellsChangedEvent, EditorSnapshot, EventCallback, RevisionChangedEvent, SessionEvent,
};
use crate::sheet::Sheet;
use crate::validation::{PayloadValidator, SchemaValidator, ValidationError};

pub const DEFAULT_ZOOM: u32 = 128;
pub const DEFAULT_ZOOM_STEP: u32 = 8;
pub const MIN_ZOOM: u32 = 8;
pub const MAX_ZOOM: u32 = 512;

/// Zoom level with its step and clamp range. Opaque to the editor; renderers
/// pick their level of detail from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom {
    level: u32,
    step: u32,
    min: u32,
    max: u32,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            level: DEFAULT_ZOOM,
            step: DEFAULT_ZOOM_STEP,
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

impl Zoom {
    /// Bounds given in the wrong order are swapped; the level is clamped.
    pub fn new(level: u32, step: u32, min: u32, max: u32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            level: level.clamp(min, max),
            step,
            min,
            max,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    /// Returns true if the level changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_level(self.level.saturating_add(self.step))
    }

    /// Returns true if the level changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_level(self.level.saturating_sub(self.step))
    }

    pub fn set_level(&mut self, level: u32) -> bool {
        let level = level.clamp(self.min, self.max);
        let changed = level != self.level;
        self.level = level;
        changed
    }
}

/// Handle returned by [`Session::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Session {
    sheet: Sheet,
    editor: EditorState,
    zoom: Zoom,
    revision: u64,
    subscribers: Vec<(SubscriptionId, EventCallback)>,
    next_subscription: u64,
    validator: Box<dyn PayloadValidator>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Sheet::new())
    }
}

impl Session {
    pub fn new(sheet: Sheet) -> Self {
        Self::with_zoom(sheet, Zoom::default())
    }

    pub fn with_zoom(sheet: Sheet, zoom: Zoom) -> Self {
        Self {
            sheet,
            editor: EditorState::new(),
            zoom,
            revision: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
            validator: Box::new(SchemaValidator),
        }
    }

    /// Replace the payload validator used by [`Session::set_cell`].
    pub fn with_validator(mut self, validator: impl PayloadValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            revision: self.revision,
            cursor: self.editor.cursor,
            selection: self.editor.selection,
            yanked: self.editor.yanked,
            mode: self.editor.mode,
            extend: self.editor.extend,
            zoom: self.zoom.level,
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn subscribe(&mut self, callback: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Run one action. Returns true if anything changed (and events were
    /// published).
    pub fn dispatch(&mut self, action: Action) -> bool {
        let zoom_changed = match action {
            Action::ZoomIn => self.zoom.zoom_in(),
            Action::ZoomOut => self.zoom.zoom_out(),
            _ => false,
        };

        let Transition { state, effect } = self.editor.reduce(&action);
        let mut cells = match effect {
            Some(effect) => self.apply_effect(effect),
            None => Vec::new(),
        };
        let editor_changed = state != self.editor;
        self.editor = state;

        if !(zoom_changed || editor_changed || !cells.is_empty()) {
            return false;
        }

        cells.sort_unstable();
        self.commit(cells, true);
        true
    }

    /// Translate a button event and dispatch it. Releases that carry no
    /// action return false.
    pub fn press(&mut self, event: ButtonEvent) -> bool {
        match Action::from_button(event) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Validate and write a cell. Rejected payloads leave the sheet as is.
    pub fn set_cell(&mut self, at: Coord, cell: Cell) -> Result<(), ValidationError> {
        if let Err(e) = self.validator.validate_cell(&cell) {
            log::warn!("rejected cell at {}: {}", at, e);
            return Err(e);
        }
        if self.sheet.get(at) == Some(&cell) || (cell.is_empty() && !self.sheet.is_occupied(at)) {
            return Ok(());
        }
        self.sheet.set_cell(at, cell);
        self.commit(vec![at], false);
        Ok(())
    }

    fn apply_effect(&mut self, effect: SheetEffect) -> Vec<Coord> {
        match effect {
            SheetEffect::Clear(rect) => {
                let removed = self.sheet.clear_cells(rect.coords());
                log::info!("cleared {} cell(s) under {}", removed.len(), rect);
                removed
            }
            SheetEffect::Transplant { source, dest } => {
                let written = self.sheet.transplant(&source, dest);
                log::info!("transplanted {} to {} ({} position(s))", source, dest, written.len());
                written
            }
        }
    }

    fn commit(&mut self, cells: Vec<Coord>, editor_event: bool) {
        let previous = self.revision;
        self.revision += 1;

        self.publish(SessionEvent::RevisionChanged(RevisionChangedEvent {
            revision: self.revision,
            previous,
        }));
        if !cells.is_empty() {
            self.publish(SessionEvent::CellsChanged(CellsChangedEvent {
                revision: self.revision,
                cells,
            }));
        }
        if editor_event {
            self.publish(SessionEvent::EditorChanged(self.snapshot()));
        }
    }

    fn publish(&mut self, event: SessionEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }
}
