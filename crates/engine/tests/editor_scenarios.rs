// End-to-end editing scenarios through the public session API.

use std::cell::RefCell;
use std::rc::Rc;

use ideagrid_core::{Coord, Path, SelectionRect};
use ideagrid_engine::{
    Action, Button, ButtonEvent, Cell, EditMode, EventCollector, Session, Sheet,
};

fn session_with(cells: &[(&str, &str)]) -> Session {
    let sheet: Sheet = cells
        .iter()
        .map(|(path, body)| (Path::parse(path).unwrap().coord(), Cell::idea(*body)))
        .collect();
    Session::new(sheet)
}

fn body_at(session: &Session, path: &str) -> Option<String> {
    let path = Path::parse(path).unwrap();
    session
        .sheet()
        .get_path(&path)
        .and_then(Cell::as_idea)
        .map(|idea| idea.body.clone())
}

fn press(session: &mut Session, buttons: &[Button]) {
    for &button in buttons {
        session.press(ButtonEvent::Pressed(button));
        session.press(ButtonEvent::Released(button));
    }
}

#[test]
fn select_drag_exit() {
    let mut session = Session::default();

    session.dispatch(Action::BeginSelect);
    assert_eq!(session.editor().mode, EditMode::Select);
    assert_eq!(session.editor().selection, Some(SelectionRect::new(0, 0, 0, 0)));

    session.dispatch(Action::MoveCursor { d_col: 1, d_row: 0 });
    assert_eq!(session.editor().cursor, Coord::new(1, 0));
    assert_eq!(session.editor().selection, Some(SelectionRect::new(1, 1, 0, 0)));

    session.dispatch(Action::Exit);
    assert_eq!(session.editor().mode, EditMode::Normal);
    assert_eq!(session.editor().selection, Some(SelectionRect::new(1, 1, 0, 0)));
}

#[test]
fn move_b1_to_d3_with_buttons() {
    let mut session = session_with(&[("B1", "x")]);

    press(
        &mut session,
        &[Button::Right, Button::Down, Button::Select, Button::Move],
    );
    assert_eq!(session.editor().mode, EditMode::SelectDestination);

    press(
        &mut session,
        &[Button::Right, Button::Right, Button::Down, Button::Down, Button::Confirm],
    );

    assert_eq!(body_at(&session, "D3").as_deref(), Some("x"));
    assert_eq!(body_at(&session, "B1").as_deref(), Some("x"));
    assert_eq!(session.editor().mode, EditMode::Normal);
    assert!(session.editor().yanked.is_none());
}

#[test]
fn shift_grows_selection_then_delete() {
    let mut session = session_with(&[("A0", "root"), ("B0", "b"), ("B1", "c"), ("C2", "keep")]);

    session.press(ButtonEvent::Pressed(Button::Select));
    session.press(ButtonEvent::Pressed(Button::Shift));
    press(&mut session, &[Button::Right, Button::Down]);
    session.press(ButtonEvent::Released(Button::Shift));

    assert_eq!(session.editor().cursor, Coord::ORIGIN);
    assert_eq!(session.editor().selection, Some(SelectionRect::new(0, 1, 0, 1)));

    session.press(ButtonEvent::Pressed(Button::Delete));
    assert_eq!(session.sheet().len(), 1);
    assert_eq!(body_at(&session, "C2").as_deref(), Some("keep"));
}

#[test]
fn moving_a_block_with_holes_clears_destination() {
    // A0 and B1 filled, A1 and B0 holes; drop the 2x2 block on B1
    let mut session = session_with(&[("A0", "a"), ("B1", "b"), ("C1", "c")]);
    session.dispatch(Action::BeginSelect);
    session.dispatch(Action::SetExtend(true));
    session.dispatch(Action::MoveCursor { d_col: 1, d_row: 1 });
    session.dispatch(Action::SetExtend(false));
    session.dispatch(Action::Move);
    session.dispatch(Action::MoveCursor { d_col: 1, d_row: 1 });
    session.dispatch(Action::Confirm);

    assert_eq!(body_at(&session, "B1").as_deref(), Some("a"));
    assert_eq!(body_at(&session, "C1"), None);
    assert_eq!(body_at(&session, "C2").as_deref(), Some("b"));
    // Source corner outside the landing block is untouched
    assert_eq!(body_at(&session, "A0").as_deref(), Some("a"));
}

#[test]
fn subscriber_sees_every_change() {
    let mut session = session_with(&[("A0", "a")]);
    let collector = Rc::new(RefCell::new(EventCollector::new()));
    let sink = Rc::clone(&collector);
    session.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    for name in ["begin-select", "delete", "exit", "confirm"] {
        session.dispatch(name.parse().unwrap());
    }

    let events = collector.borrow();
    assert_eq!(events.revision_changed().len(), 3);
    assert_eq!(events.cells_changed().len(), 1);
    assert_eq!(events.cells_changed()[0].cells, vec![Coord::ORIGIN]);
    assert_eq!(
        events.last_snapshot().map(|s| s.mode),
        Some(EditMode::Normal)
    );
    assert_eq!(session.revision(), 3);
}
