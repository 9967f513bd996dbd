#![warn(clippy::all, clippy::pedantic)]

use log::info;

use crate::components::GameState;
use crate::config::rules::Rules;
use crate::grid::Grid;

/// Runs after a lock-in: removes every full row, compacts the grid and
/// advances the line count and drop rate. `on_cleared` sees each removed row
/// index, bottom to top, before the grid is compacted. Returns the removed rows.
pub fn clear_full_rows(
    grid: &mut Grid,
    state: &mut GameState,
    rules: &Rules,
    mut on_cleared: impl FnMut(usize),
) -> Vec<usize> {
    let rows = grid.full_rows();
    if rows.is_empty() {
        return rows;
    }

    for &row in &rows {
        on_cleared(row);
    }
    grid.collapse(&rows);

    let count = u32::try_from(rows.len()).unwrap_or(u32::MAX);
    let bumps = state.record_lines(count, rules);
    info!(
        "Cleared {count} rows, {} total, rate {}{}",
        state.lines,
        state.drop_rate,
        if bumps > 0 { " (faster)" } else { "" }
    );
    rows
}
