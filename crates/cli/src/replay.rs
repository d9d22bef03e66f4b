//! Scenario replay: load a TOML scenario, run its actions through a session.
//!
//! Usage: igrid replay scenario.toml [--format text|json] [--zoom N]
//!
//! ## Scenario format
//!
//! ```toml
//! zoom = 64                    # optional, overrides settings
//! cursor = "B1"                # optional starting cursor
//! actions = ["begin-select", "move", "right", "right", "confirm"]
//!
//! [cells.B1]
//! type = "idea"
//! body = "x"
//! extends = [{ type = "idea", path = "A0" }]
//! ```
//!
//! Every cell payload is validated before the first action runs. A payload
//! that fails validation is logged and left out of the sheet; the rest of
//! the scenario still runs. Two keys that decode to the same coordinate
//! (`AB1` and `BA1`) reject the scenario.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path as FsPath, PathBuf};

use serde::Deserialize;

use ideagrid_core::{AddressError, Coord, Path};
use ideagrid_engine::validation::parse_contents;
use ideagrid_engine::{Action, Cell, CellContents, Session, Sheet, ValidationError, Zoom};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scenario syntax: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("bad cell path '{path}': {source}")]
    BadPath {
        path: String,
        #[source]
        source: AddressError,
    },

    #[error("cells {first} and {second} both address {at}")]
    DuplicateCell {
        first: String,
        second: String,
        at: Coord,
    },

    #[error("action #{index}: {message}")]
    BadAction { index: usize, message: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    zoom: Option<u32>,
    cursor: Option<String>,
    #[serde(default)]
    cells: BTreeMap<String, toml::Value>,
    #[serde(default)]
    actions: Vec<String>,
}

/// A parsed, validated scenario.
#[derive(Debug)]
pub struct Scenario {
    pub zoom: Option<u32>,
    pub cursor: Option<Coord>,
    pub sheet: Sheet,
    pub actions: Vec<Action>,
    /// Cell keys whose payloads failed validation and were skipped.
    pub rejected: Vec<String>,
}

/// Outcome of a replay.
pub struct ReplayResult {
    pub session: Session,
    /// Actions that changed something.
    pub effective: usize,
    pub total: usize,
    pub rejected: Vec<String>,
}

impl Scenario {
    pub fn load(path: &FsPath) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let file: ScenarioFile = toml::from_str(text)?;

        let mut sheet = Sheet::new();
        let mut seen: BTreeMap<Coord, &str> = BTreeMap::new();
        let mut rejected = Vec::new();
        for (key, value) in &file.cells {
            let path = parse_path(key)?;
            if let Some(first) = seen.insert(path.coord(), key.as_str()) {
                return Err(ScenarioError::DuplicateCell {
                    first: first.to_string(),
                    second: key.clone(),
                    at: path.coord(),
                });
            }
            match cell_contents(value) {
                Ok(contents) => sheet.set_path(&path, Cell::new(contents)),
                Err(e) => {
                    log::warn!("skipping cell {}: {}", key, e);
                    rejected.push(key.clone());
                }
            }
        }

        let cursor = match &file.cursor {
            Some(text) => Some(parse_path(text)?.coord()),
            None => None,
        };

        let actions = file
            .actions
            .iter()
            .enumerate()
            .map(|(index, name)| {
                name.parse::<Action>().map_err(|e| ScenarioError::BadAction {
                    index,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            zoom: file.zoom,
            cursor,
            sheet,
            actions,
            rejected,
        })
    }

    /// Run the scenario from a fresh session. `zoom` is the configured zoom;
    /// a zoom in the scenario file overrides its level.
    pub fn replay(self, mut zoom: Zoom) -> ReplayResult {
        if let Some(level) = self.zoom {
            zoom.set_level(level);
        }

        let mut session = Session::with_zoom(self.sheet, zoom);
        if let Some(cursor) = self.cursor {
            let (d_col, d_row) = Coord::ORIGIN.delta_to(cursor);
            session.dispatch(Action::MoveCursor { d_col, d_row });
        }

        let total = self.actions.len();
        let mut effective = 0;
        for action in self.actions {
            if session.dispatch(action) {
                effective += 1;
            } else {
                log::debug!("{} changed nothing", action);
            }
        }
        log::info!("replayed {} action(s), {} effective", total, effective);

        ReplayResult {
            session,
            effective,
            total,
            rejected: self.rejected,
        }
    }
}

fn cell_contents(value: &toml::Value) -> Result<CellContents, ValidationError> {
    let json = serde_json::to_value(value).map_err(|e| ValidationError::Shape(e.to_string()))?;
    parse_contents(&json)
}

fn parse_path(text: &str) -> Result<Path, ScenarioError> {
    Path::parse(text).map_err(|source| ScenarioError::BadPath {
        path: text.to_string(),
        source,
    })
}
