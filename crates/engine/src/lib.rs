pub mod action;
pub mod cell;
pub mod editor;
pub mod events;
pub mod mode;
pub mod session;
pub mod sheet;
pub mod validation;

#[cfg(test)]
pub mod harness;

pub use action::{Action, Button, ButtonEvent};
pub use cell::{Cell, CellContents, IdeaCell, Ref};
pub use editor::{EditorState, SheetEffect, Transition};
pub use events::{EditorSnapshot, EventCollector, SessionEvent};
pub use mode::EditMode;
pub use session::{Session, SubscriptionId, Zoom};
pub use sheet::Sheet;
pub use validation::{PayloadValidator, SchemaValidator, ValidationError};
