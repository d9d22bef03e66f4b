// Property-based tests for sheet operations and the editor reducer.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeMap;

use proptest::prelude::*;
use ideagrid_core::{Coord, SelectionRect};
use ideagrid_engine::{Action, Cell, EditMode, EditorState, Sheet};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_coord() -> impl Strategy<Value = Coord> {
    (0i32..12, 0i32..12).prop_map(|(col, row)| Coord::new(col, row))
}

/// Sparse sheets with short bodies; later duplicates win.
fn arb_sheet() -> impl Strategy<Value = Sheet> {
    prop::collection::vec((arb_coord(), "[a-z]{1,4}"), 0..30).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(at, body)| (at, Cell::idea(body)))
            .collect()
    })
}

fn arb_rect() -> impl Strategy<Value = SelectionRect> {
    (arb_coord(), arb_coord()).prop_map(|(a, b)| SelectionRect::from_corners(a, b))
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::BeginSelect),
        Just(Action::Exit),
        Just(Action::Delete),
        Just(Action::Move),
        Just(Action::Confirm),
        Just(Action::SetExtend(true)),
        Just(Action::SetExtend(false)),
        (-2i32..=2, -2i32..=2).prop_map(|(d_col, d_row)| Action::MoveCursor { d_col, d_row }),
    ]
}

fn contents(sheet: &Sheet) -> BTreeMap<Coord, Cell> {
    sheet.iter().map(|(at, cell)| (at, cell.clone())).collect()
}

// ---------------------------------------------------------------------------
// Sheet laws
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn clear_cells_removes_exactly_the_rect(sheet in arb_sheet(), rect in arb_rect()) {
        let before = contents(&sheet);
        let mut after = sheet.clone();
        after.clear_cells(rect.coords());

        for (at, cell) in &before {
            if rect.contains(*at) {
                prop_assert!(after.get(*at).is_none(), "{} survived", at);
            } else {
                prop_assert_eq!(after.get(*at), Some(cell));
            }
        }
        prop_assert!(after.len() <= before.len());
    }

    #[test]
    fn transplant_reproduces_block(sheet in arb_sheet(), rect in arb_rect(), dest in arb_coord()) {
        let before = sheet.clone();
        let mut after = sheet;
        after.transplant(&rect, dest);
        let (d_cols, d_rows) = rect.origin().delta_to(dest);

        for at in rect.coords() {
            prop_assert_eq!(after.get(at.offset(d_cols, d_rows)), before.get(at));
        }

        // Outside source and destination nothing moves
        let landed = rect.translate(d_cols, d_rows);
        for (at, cell) in before.iter() {
            if !landed.contains(at) {
                prop_assert_eq!(after.get(at), Some(cell));
            }
        }
    }

    #[test]
    fn extract_covers_every_position(sheet in arb_sheet(), rect in arb_rect()) {
        let sub = sheet.extract_subsheet(&rect);
        prop_assert_eq!(sub.origin(), rect.origin());
        prop_assert_eq!(sub.len(), rect.cell_count());
        for at in rect.coords() {
            let expected = sheet.get(at).cloned().unwrap_or_default();
            prop_assert_eq!(sub.get(at), Some(&expected));
        }
    }

    #[test]
    fn translate_sheet_inverse(sheet in arb_sheet(), dc in -20i32..20, dr in -20i32..20) {
        prop_assert_eq!(sheet.translate(dc, dr).translate(-dc, -dr), sheet);
    }

    // -----------------------------------------------------------------------
    // Reducer
    // -----------------------------------------------------------------------

    #[test]
    fn reducer_invariants(actions in prop::collection::vec(arb_action(), 0..40)) {
        let mut state = EditorState::new();
        for action in &actions {
            state.apply(action);
            if state.mode.is_selecting() {
                prop_assert!(state.selection.is_some());
            }
            if state.mode == EditMode::SelectDestination {
                prop_assert!(state.yanked.is_some());
            } else {
                prop_assert!(state.yanked.is_none());
            }
        }
    }

    #[test]
    fn reduce_is_pure(actions in prop::collection::vec(arb_action(), 0..20), last in arb_action()) {
        let mut state = EditorState::new();
        for action in &actions {
            state.apply(action);
        }
        prop_assert_eq!(state.reduce(&last), state.reduce(&last));
    }
}
