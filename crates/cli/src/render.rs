//! Text and JSON views of a session.
//!
//! The text view shows a window of the sheet around the cursor. How much of
//! each cell is printed depends on zoom: the path always, the body above 32,
//! the extends list above 48, the type tag above 80.

use serde_json::{json, Map, Value};

use ideagrid_core::Coord;
use ideagrid_engine::{Cell, EditorSnapshot, Sheet};

const BODY_ZOOM: u32 = 32;
const EXTENDS_ZOOM: u32 = 48;
const TYPE_ZOOM: u32 = 80;
const MAX_CELL_WIDTH: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detail {
    pub body: bool,
    pub extends: bool,
    pub type_tag: bool,
}

impl Detail {
    pub fn for_zoom(zoom: u32) -> Self {
        Self {
            body: zoom > BODY_ZOOM,
            extends: zoom > EXTENDS_ZOOM,
            type_tag: zoom > TYPE_ZOOM,
        }
    }
}

/// Path for encodable positions, `(col, row)` otherwise.
pub fn label(at: Coord) -> String {
    match at.to_path() {
        Ok(path) => path.to_string(),
        Err(_) => at.to_string(),
    }
}

fn cell_text(at: Coord, cell: &Cell, detail: Detail) -> String {
    let mut parts = vec![label(at)];
    if let Some(contents) = &cell.contents {
        if detail.type_tag {
            parts.push(format!("[{}]", contents.type_name()));
        }
    }
    if let Some(idea) = cell.as_idea() {
        if detail.body {
            parts.push(format!("{:?}", idea.body));
        }
        if detail.extends && !idea.extends.is_empty() {
            let targets: Vec<&str> = idea.extends.iter().map(|r| r.path.as_str()).collect();
            parts.push(format!("^{}", targets.join(",")));
        }
    }
    truncate(&parts.join(" "), MAX_CELL_WIDTH)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

/// First visible index on one axis so that `cursor` is inside a window of
/// `span` positions.
fn window_start(cursor: i32, span: u32) -> i32 {
    let span = span.max(1) as i32;
    if cursor < 0 {
        cursor
    } else {
        (cursor - (span - 1)).max(0)
    }
}

/// Marker pair: cursor, then yanked (`~`) over selected (`#`).
fn marker(at: Coord, snapshot: &EditorSnapshot) -> String {
    let cursor = if at == snapshot.cursor { '>' } else { ' ' };
    let region = if snapshot.yanked.is_some_and(|r| r.contains(at)) {
        '~'
    } else if snapshot.selection.is_some_and(|r| r.contains(at)) {
        '#'
    } else {
        ' '
    };
    format!("{cursor}{region}")
}

pub fn render_text(sheet: &Sheet, snapshot: &EditorSnapshot, cols: u32, rows: u32) -> String {
    let detail = Detail::for_zoom(snapshot.zoom);
    let start = Coord::new(
        window_start(snapshot.cursor.col, cols),
        window_start(snapshot.cursor.row, rows),
    );

    // Cell strings, row-major for printing
    let grid: Vec<Vec<String>> = (0..rows as i32)
        .map(|dr| {
            (0..cols as i32)
                .map(|dc| {
                    let at = start.offset(dc, dr);
                    let text = match sheet.get(at) {
                        Some(cell) => cell_text(at, cell, detail),
                        None => ".".to_string(),
                    };
                    format!("{}{}", marker(at, snapshot), text)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..cols as usize)
        .map(|c| {
            grid.iter()
                .map(|row| row[c].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(grid.len() + 2);
    for row in &grid {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &w)| format!("{:<w$}", text, w = w))
            .collect();
        lines.push(line.join(" | ").trim_end().to_string());
    }

    lines.push(String::new());
    lines.push(status_line(snapshot));
    lines.join("\n")
}

pub fn status_line(snapshot: &EditorSnapshot) -> String {
    let rect = |r: Option<ideagrid_core::SelectionRect>| match r {
        Some(r) => r.to_string(),
        None => "-".to_string(),
    };
    format!(
        "mode: {}  cursor: {}  selection: {}  yanked: {}  zoom: {}  revision: {}",
        snapshot.mode,
        label(snapshot.cursor),
        rect(snapshot.selection),
        rect(snapshot.yanked),
        snapshot.zoom,
        snapshot.revision,
    )
}

/// Sheet cells keyed by label, in column-major order.
pub fn cells_json(sheet: &Sheet) -> Value {
    let mut cells = Map::new();
    for (at, cell) in sheet.iter() {
        let value = match &cell.contents {
            Some(contents) => serde_json::to_value(contents).unwrap_or(Value::Null),
            None => Value::Null,
        };
        cells.insert(label(at), value);
    }
    Value::Object(cells)
}

pub fn render_json(sheet: &Sheet, snapshot: &EditorSnapshot, total: usize, effective: usize) -> Value {
    json!({
        "snapshot": snapshot,
        "cells": cells_json(sheet),
        "actions": {
            "total": total,
            "effective": effective,
        },
    })
}
