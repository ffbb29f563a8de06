use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::pipeline::PLACEHOLDER;

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

pub fn color_coded_status_cell(status: &str) -> Cell {
    let color = match status {
        "success" => TableColor::Green,
        "failure" | "error" | "killed" | "declined" => TableColor::Red,
        "running" | "pending" | "blocked" | "created" => TableColor::Yellow,
        _ => TableColor::DarkGrey,
    };
    Cell::new(status).fg(color)
}

/// Dims cells that only hold the placeholder.
pub fn time_cell(text: &str) -> Cell {
    if text == PLACEHOLDER {
        Cell::new(text).fg(TableColor::DarkGrey)
    } else {
        Cell::new(text)
    }
}
