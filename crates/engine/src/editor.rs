//! Editor state machine.
//!
//! [`EditorState::reduce`] is pure: it takes an [`Action`] and returns the next
//! state plus at most one [`SheetEffect`] for the session to apply. Nothing
//! here touches a sheet.

use serde::Serialize;

use ideagrid_core::{Coord, SelectionRect};

use crate::action::Action;
use crate::mode::EditMode;

/// Cursor, selection and mode of one editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EditorState {
    pub cursor: Coord,
    pub selection: Option<SelectionRect>,
    /// Block picked up by `move`, waiting for `confirm`.
    pub yanked: Option<SelectionRect>,
    pub mode: EditMode,
    /// Extend modifier held: cursor moves grow the selection instead of
    /// dragging it.
    pub extend: bool,
}

/// Sheet mutation requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SheetEffect {
    /// Remove every cell under the rect.
    Clear(SelectionRect),
    /// Copy the block under `source` so its start corner lands on `dest`.
    Transplant { source: SelectionRect, dest: Coord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: EditorState,
    pub effect: Option<SheetEffect>,
}

impl Transition {
    fn to(state: EditorState) -> Self {
        Self { state, effect: None }
    }

    fn with_effect(state: EditorState, effect: SheetEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

impl EditorState {
    /// Cursor at `A0`, nothing selected, normal mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(cursor: Coord) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Compute the transition for `action`. Guarded actions that do not apply
    /// in the current mode return the state unchanged and no effect.
    pub fn reduce(&self, action: &Action) -> Transition {
        let mut next = *self;

        match (*action, self.mode) {
            (Action::MoveCursor { d_col, d_row }, _) => {
                next.move_cursor(d_col, d_row);
                Transition::to(next)
            }

            (Action::SetExtend(held), _) => {
                next.extend = held;
                Transition::to(next)
            }

            (Action::Reset, _) => {
                log::debug!("editor reset from {}", self.mode);
                Transition::to(EditorState::new())
            }

            // Zoom belongs to the session.
            (Action::ZoomIn | Action::ZoomOut, _) => Transition::to(next),

            (Action::BeginSelect, EditMode::Normal) => {
                next.mode = EditMode::Select;
                next.selection = Some(SelectionRect::single(self.cursor));
                log::debug!("normal -> select at {}", self.cursor);
                Transition::to(next)
            }

            (Action::Exit, mode) if !mode.is_normal() => {
                next.mode = EditMode::Normal;
                next.yanked = None;
                log::debug!("{} -> normal", mode);
                Transition::to(next)
            }

            (Action::Delete, EditMode::Select) => match self.selection {
                Some(rect) => Transition::with_effect(next, SheetEffect::Clear(rect)),
                None => self.ignore(action),
            },

            (Action::Move, EditMode::Select) => match self.selection {
                Some(rect) => {
                    next.yanked = Some(rect);
                    next.mode = EditMode::SelectDestination;
                    log::debug!("select -> select-destination, yanked {}", rect);
                    Transition::to(next)
                }
                None => self.ignore(action),
            },

            (Action::Confirm, EditMode::SelectDestination) => match self.yanked {
                Some(source) => {
                    next.yanked = None;
                    next.mode = EditMode::Normal;
                    log::debug!("select-destination -> normal, drop at {}", self.cursor);
                    Transition::with_effect(
                        next,
                        SheetEffect::Transplant {
                            source,
                            dest: self.cursor,
                        },
                    )
                }
                None => self.ignore(action),
            },

            _ => self.ignore(action),
        }
    }

    /// Apply `reduce` in place and hand back the effect.
    pub fn apply(&mut self, action: &Action) -> Option<SheetEffect> {
        let Transition { state, effect } = self.reduce(action);
        *self = state;
        effect
    }

    fn move_cursor(&mut self, d_col: i32, d_row: i32) {
        let selection = match self.selection {
            Some(rect) if self.mode.is_selecting() => rect,
            _ => {
                self.cursor = self.cursor.offset(d_col, d_row);
                return;
            }
        };

        if self.extend {
            self.selection = Some(selection.resize(d_col, d_row));
        } else {
            self.selection = Some(selection.translate(d_col, d_row));
            self.cursor = self.cursor.offset(d_col, d_row);
        }
    }

    fn ignore(&self, action: &Action) -> Transition {
        log::debug!("ignoring {} in {} mode", action, self.mode);
        Transition::to(*self)
    }
}
