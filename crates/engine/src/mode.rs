//! Editing modes

use serde::{Deserialize, Serialize};

/// Editing mode: determines what cursor movement and the edit buttons do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditMode {
    #[default]
    Normal,               // Arrows move the cursor
    Select,               // A selection rides with the cursor; delete/move act on it
    SelectDestination,    // Choosing where the yanked block lands
    Duplicate,            // Reserved, never entered
    DuplicateAsReference, // Reserved, never entered
}

impl EditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditMode::Normal => "normal",
            EditMode::Select => "select",
            EditMode::SelectDestination => "select-destination",
            EditMode::Duplicate => "duplicate",
            EditMode::DuplicateAsReference => "duplicate-as-reference",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, EditMode::Normal)
    }

    /// True if cursor movement drags (or with extend, grows) the selection.
    pub fn is_selecting(&self) -> bool {
        matches!(self, EditMode::Select | EditMode::SelectDestination)
    }
}

impl std::fmt::Display for EditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
