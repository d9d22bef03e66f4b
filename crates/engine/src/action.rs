//! Logical input: buttons as the input layer reports them, and the actions
//! the editor state machine understands.
//!
//! Physical key bindings live outside the engine. Whatever maps keys (or
//! gamepad buttons, or a script) produces [`ButtonEvent`]s; those translate
//! to [`Action`]s with [`Action::from_button`].

use std::fmt;
use std::str::FromStr;

use ideagrid_core::Direction;

/// Logical buttons delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    Shift,
    Select,
    Delete,
    Move,
    Confirm,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    Pressed(Button),
    Released(Button),
}

/// A state-machine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Start a selection at the cursor.
    BeginSelect,
    /// Leave any non-normal mode.
    Exit,
    /// Clear the cells under the selection.
    Delete,
    /// Yank the selection and start choosing a destination.
    Move,
    /// Drop the yanked block at the cursor.
    Confirm,
    MoveCursor { d_col: i32, d_row: i32 },
    /// Extend modifier held (`true`) or released (`false`).
    SetExtend(bool),
    ZoomIn,
    ZoomOut,
    /// Reinitialize the editor state.
    Reset,
}

impl Action {
    /// Unit cursor move.
    pub fn step(direction: Direction) -> Action {
        let (d_col, d_row) = direction.delta();
        Action::MoveCursor { d_col, d_row }
    }

    /// Translate a button event. Only presses act, except for the extend
    /// modifier whose release matters too.
    pub fn from_button(event: ButtonEvent) -> Option<Action> {
        match event {
            ButtonEvent::Pressed(button) => Some(match button {
                Button::Right => Action::step(Direction::Right),
                Button::Left => Action::step(Direction::Left),
                Button::Up => Action::step(Direction::Up),
                Button::Down => Action::step(Direction::Down),
                Button::Shift => Action::SetExtend(true),
                Button::Select => Action::BeginSelect,
                Button::Delete => Action::Delete,
                Button::Move => Action::Move,
                Button::Confirm => Action::Confirm,
                Button::Exit => Action::Exit,
            }),
            ButtonEvent::Released(Button::Shift) => Some(Action::SetExtend(false)),
            ButtonEvent::Released(_) => None,
        }
    }
}

/// Error for unrecognized action names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("unknown action '{0}'")]
    Unknown(String),

    #[error("invalid move-cursor delta '{0}' (expected move-cursor:<cols>,<rows>)")]
    BadDelta(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(delta) = name.strip_prefix("move-cursor:") {
            let bad = || ActionParseError::BadDelta(delta.to_string());
            let (cols, rows) = delta.split_once(',').ok_or_else(bad)?;
            let d_col = cols.trim().parse().map_err(|_| bad())?;
            let d_row = rows.trim().parse().map_err(|_| bad())?;
            return Ok(Action::MoveCursor { d_col, d_row });
        }

        Ok(match name {
            "begin-select" | "select" => Action::BeginSelect,
            "exit" => Action::Exit,
            "delete" => Action::Delete,
            "move" => Action::Move,
            "confirm" => Action::Confirm,
            "right" => Action::step(Direction::Right),
            "left" => Action::step(Direction::Left),
            "up" => Action::step(Direction::Up),
            "down" => Action::step(Direction::Down),
            "shift-down" => Action::SetExtend(true),
            "shift-up" => Action::SetExtend(false),
            "zoom-in" => Action::ZoomIn,
            "zoom-out" => Action::ZoomOut,
            "reset" => Action::Reset,
            _ => return Err(ActionParseError::Unknown(name.to_string())),
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::BeginSelect => f.write_str("begin-select"),
            Action::Exit => f.write_str("exit"),
            Action::Delete => f.write_str("delete"),
            Action::Move => f.write_str("move"),
            Action::Confirm => f.write_str("confirm"),
            Action::MoveCursor { d_col, d_row } => write!(f, "move-cursor:{d_col},{d_row}"),
            Action::SetExtend(true) => f.write_str("shift-down"),
            Action::SetExtend(false) => f.write_str("shift-up"),
            Action::ZoomIn => f.write_str("zoom-in"),
            Action::ZoomOut => f.write_str("zoom-out"),
            Action::Reset => f.write_str("reset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_button_presses() {
        assert_eq!(
            Action::from_button(ButtonEvent::Pressed(Button::Right)),
            Some(Action::MoveCursor { d_col: 1, d_row: 0 })
        );
        assert_eq!(
            Action::from_button(ButtonEvent::Pressed(Button::Up)),
            Some(Action::MoveCursor { d_col: 0, d_row: -1 })
        );
        assert_eq!(
            Action::from_button(ButtonEvent::Pressed(Button::Select)),
            Some(Action::BeginSelect)
        );
        assert_eq!(
            Action::from_button(ButtonEvent::Pressed(Button::Shift)),
            Some(Action::SetExtend(true))
        );
    }

    #[test]
    fn test_from_button_releases() {
        assert_eq!(
            Action::from_button(ButtonEvent::Released(Button::Shift)),
            Some(Action::SetExtend(false))
        );
        assert_eq!(Action::from_button(ButtonEvent::Released(Button::Right)), None);
        assert_eq!(Action::from_button(ButtonEvent::Released(Button::Confirm)), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("begin-select".parse::<Action>(), Ok(Action::BeginSelect));
        assert_eq!("select".parse::<Action>(), Ok(Action::BeginSelect));
        assert_eq!(" down ".parse::<Action>(), Ok(Action::MoveCursor { d_col: 0, d_row: 1 }));
        assert_eq!("shift-down".parse::<Action>(), Ok(Action::SetExtend(true)));
        assert_eq!(
            "move-cursor:-2, 3".parse::<Action>(),
            Ok(Action::MoveCursor { d_col: -2, d_row: 3 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "teleport".parse::<Action>(),
            Err(ActionParseError::Unknown("teleport".into()))
        );
        assert_eq!(
            "move-cursor:1".parse::<Action>(),
            Err(ActionParseError::BadDelta("1".into()))
        );
        assert_eq!(
            "move-cursor:a,b".parse::<Action>(),
            Err(ActionParseError::BadDelta("a,b".into()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let actions = [
            Action::BeginSelect,
            Action::Exit,
            Action::Delete,
            Action::Move,
            Action::Confirm,
            Action::MoveCursor { d_col: 4, d_row: -1 },
            Action::SetExtend(true),
            Action::SetExtend(false),
            Action::ZoomIn,
            Action::ZoomOut,
            Action::Reset,
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }
}
