//! Payload validation for cell contents.
//!
//! Validation sits at the boundary where cell content is constructed (scenario
//! files, pasted JSON, API callers). It never aborts the surrounding
//! operation: callers log the reason and treat the field as absent.
//!
//! ## Rules
//!
//! - **Ref**: `type` non-empty; `path` at least two characters and a
//!   well-formed path (`[A-Z]+[0-9]+`).
//! - **Idea**: `body` shorter than [`MAX_BODY_CHARS`] characters (not bytes);
//!   every entry of `extends` is a valid Ref.

use serde::de::DeserializeOwned;
use serde_json::Value;

use ideagrid_core::address;

use crate::cell::{Cell, CellContents, IdeaCell, Ref, MAX_BODY_CHARS};

/// Why a payload was rejected. `Display` is the reason string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("type was too short")]
    EmptyType,

    #[error("path '{0}' is too short")]
    PathTooShort(String),

    #[error("path '{0}' does not match [A-Z]+[0-9]+")]
    PathPattern(String),

    #[error("body must be under {MAX_BODY_CHARS} characters (got {0})")]
    BodyTooLong(usize),

    #[error("extends[{index}]: {reason}")]
    Extends {
        index: usize,
        reason: Box<ValidationError>,
    },

    /// The JSON did not have the expected shape at all.
    #[error("malformed payload: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Predicate over candidate payloads.
pub trait PayloadValidator {
    fn validate_ref(&self, r: &Ref) -> Result<()>;

    fn validate_contents(&self, contents: &CellContents) -> Result<()>;

    /// Empty cells are always valid.
    fn validate_cell(&self, cell: &Cell) -> Result<()> {
        match &cell.contents {
            Some(contents) => self.validate_contents(contents),
            None => Ok(()),
        }
    }
}

/// The built-in rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    fn validate_idea(&self, idea: &IdeaCell) -> Result<()> {
        let chars = idea.body.chars().count();
        if chars >= MAX_BODY_CHARS {
            return Err(ValidationError::BodyTooLong(chars));
        }
        for (index, r) in idea.extends.iter().enumerate() {
            self.validate_ref(r).map_err(|e| ValidationError::Extends {
                index,
                reason: Box::new(e),
            })?;
        }
        Ok(())
    }
}

impl PayloadValidator for SchemaValidator {
    fn validate_ref(&self, r: &Ref) -> Result<()> {
        if r.kind.is_empty() {
            return Err(ValidationError::EmptyType);
        }
        if r.path.chars().count() < 2 {
            return Err(ValidationError::PathTooShort(r.path.clone()));
        }
        address::decode(&r.path).map_err(|_| ValidationError::PathPattern(r.path.clone()))?;
        Ok(())
    }

    fn validate_contents(&self, contents: &CellContents) -> Result<()> {
        match contents {
            CellContents::Idea(idea) => self.validate_idea(idea),
        }
    }
}

fn from_json<T: DeserializeOwned>(value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| ValidationError::Shape(e.to_string()))
}

/// Deserialize and validate a candidate `{type, path}` reference.
pub fn parse_ref(value: &Value) -> Result<Ref> {
    let r: Ref = from_json(value)?;
    SchemaValidator.validate_ref(&r)?;
    Ok(r)
}

/// Deserialize and validate a candidate cell payload such as
/// `{"type": "idea", "body": "...", "extends": [...]}`.
pub fn parse_contents(value: &Value) -> Result<CellContents> {
    let contents: CellContents = from_json(value)?;
    SchemaValidator.validate_contents(&contents)?;
    Ok(contents)
}

/// Accepts either a bare reference or a cell payload, whichever the `type`
/// field suggests (`"idea"` with a body is a payload, anything with a `path`
/// is a reference).
pub fn parse_candidate(value: &Value) -> Result<Candidate> {
    let is_payload = value.get("type").and_then(Value::as_str) == Some("idea")
        && value.get("body").is_some();
    if is_payload {
        parse_contents(value).map(Candidate::Contents)
    } else {
        parse_ref(value).map(Candidate::Ref)
    }
}

/// A validated boundary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Ref(Ref),
    Contents(CellContents),
}
