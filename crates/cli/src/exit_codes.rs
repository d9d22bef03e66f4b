//! CLI Exit Code Registry
//!
//! Single source of truth for `igrid` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad args, missing file, bad path) |
//! | 3    | Invalid cell payload or reference              |
//! | 4    | Invalid scenario (syntax, unknown action)      |
//!
//! A scenario cell that fails validation is skipped with a warning, not an
//! exit code.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable input file, malformed path.
pub const EXIT_USAGE: u8 = 2;

/// A payload or reference failed validation.
pub const EXIT_INVALID_PAYLOAD: u8 = 3;

/// A scenario file could not be parsed or replayed.
pub const EXIT_INVALID_SCENARIO: u8 = 4;

use crate::replay::ScenarioError;

/// Map a ScenarioError to its exit code.
pub fn scenario_exit_code(err: &ScenarioError) -> u8 {
    match err {
        ScenarioError::Read { .. } => EXIT_USAGE,
        ScenarioError::Syntax(_)
        | ScenarioError::BadPath { .. }
        | ScenarioError::DuplicateCell { .. }
        | ScenarioError::BadAction { .. } => EXIT_INVALID_SCENARIO,
    }
}
