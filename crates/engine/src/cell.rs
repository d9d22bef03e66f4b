use serde::{Deserialize, Serialize};

use ideagrid_core::address::{self, Path};

/// Idea bodies must be strictly shorter than this many characters.
pub const MAX_BODY_CHARS: usize = 280;

/// Path every new idea extends unless told otherwise.
pub const DEFAULT_EXTENDS_PATH: &str = "A0";

/// A typed pointer to another cell: `{ "type": ..., "path": ... }`.
///
/// The path is kept as written; validation decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
}

impl Ref {
    pub fn new(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Decode the target path. Fails for malformed paths.
    pub fn target(&self) -> address::Result<Path> {
        Path::parse(&self.path)
    }
}

/// Payload of an idea cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdeaCell {
    pub body: String,
    pub extends: Vec<Ref>,
}

/// Typed cell payload, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellContents {
    Idea(IdeaCell),
}

impl CellContents {
    pub fn type_name(&self) -> &'static str {
        match self {
            CellContents::Idea(_) => "idea",
        }
    }
}

/// A cell slot. No contents means the slot is empty.
///
/// An empty `Cell` and a missing sheet entry mean the same thing; sheets
/// drop empty cells on write.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub contents: Option<CellContents>,
}

impl Cell {
    pub fn empty() -> Self {
        Self { contents: None }
    }

    pub fn new(contents: CellContents) -> Self {
        Self {
            contents: Some(contents),
        }
    }

    /// An idea with the given body, extending `A0`.
    pub fn idea(body: impl Into<String>) -> Self {
        Self::new(CellContents::Idea(IdeaCell {
            body: body.into(),
            extends: vec![Ref::new(DEFAULT_EXTENDS_PATH, "idea")],
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    pub fn as_idea(&self) -> Option<&IdeaCell> {
        match &self.contents {
            Some(CellContents::Idea(idea)) => Some(idea),
            None => None,
        }
    }
}

impl From<IdeaCell> for Cell {
    fn from(idea: IdeaCell) -> Self {
        Cell::new(CellContents::Idea(idea))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_idea_constructor() {
        let cell = Cell::idea("hello");
        let idea = cell.as_idea().unwrap();
        assert_eq!(idea.body, "hello");
        assert_eq!(idea.extends, vec![Ref::new("A0", "idea")]);
        assert!(!cell.is_empty());
        assert!(Cell::empty().is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(Cell::idea("x")).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": {
                    "type": "idea",
                    "body": "x",
                    "extends": [{"type": "idea", "path": "A0"}]
                }
            })
        );
    }

    #[test]
    fn test_contents_deserialize() {
        let contents: CellContents =
            serde_json::from_value(json!({"type": "idea", "body": "b", "extends": []})).unwrap();
        assert_eq!(
            contents,
            CellContents::Idea(IdeaCell {
                body: "b".into(),
                extends: vec![],
            })
        );
        assert!(serde_json::from_value::<CellContents>(json!({"type": "chart"})).is_err());
        // extends is required on the wire, even when empty
        assert!(serde_json::from_value::<CellContents>(json!({"type": "idea", "body": "b"})).is_err());
    }

    #[test]
    fn test_empty_cell_deserialize() {
        let cell: Cell = serde_json::from_value(json!({})).unwrap();
        assert!(cell.is_empty());
    }

    #[test]
    fn test_ref_target() {
        assert_eq!(Ref::new("C12", "idea").target().unwrap().to_string(), "C12");
        assert!(Ref::new("12", "idea").target().is_err());
    }
}
