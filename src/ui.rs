#![allow(clippy::cast_possible_truncation)]

use ratatui::{
    Terminal,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

use crate::game::{GRID_WIDTH, MASK_SIZE, VISIBLE_HEIGHT};
use crate::render::{RenderSink, Snapshot};
use crate::shapes::{PieceType, ShapeMask};

const CELL_WIDTH: u16 = 2; // Each cell is 2 characters wide
const BOARD_WIDTH: u16 = GRID_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_HEIGHT: u16 = VISIBLE_HEIGHT as u16 + 2;
const INFO_WIDTH: u16 = 24;

pub const START_TEXT: &str = "Press ↓ to play.";
pub const GAME_OVER_TEXT: &str = "You topped off.\nPress ↓ to retry.";

#[must_use]
pub fn piece_color(piece: Option<PieceType>) -> Color {
    match piece {
        Some(PieceType::I) => Color::Rgb(0, 255, 255),
        Some(PieceType::L) => Color::Rgb(255, 128, 0),
        Some(PieceType::J) => Color::Rgb(0, 0, 255),
        Some(PieceType::O) => Color::Rgb(255, 255, 0),
        Some(PieceType::S) => Color::Rgb(0, 255, 0),
        Some(PieceType::T) => Color::Rgb(255, 0, 255),
        Some(PieceType::Z) => Color::Rgb(255, 0, 0),
        None => Color::Rgb(128, 128, 128),
    }
}

// Rows highlighted after being cleared, with when they started
#[derive(Debug, Default)]
pub struct RowFlashes {
    flashes: Vec<(usize, Instant)>,
}

impl RowFlashes {
    pub fn record(&mut self, rows: &[usize], now: Instant) {
        self.flashes.extend(rows.iter().map(|&row| (row, now)));
    }

    pub fn prune(&mut self, now: Instant, duration: Duration) {
        self.flashes
            .retain(|(_, started)| now.duration_since(*started) < duration);
    }

    #[must_use]
    pub fn is_flashing(&self, row: usize) -> bool {
        self.flashes.iter().any(|(r, _)| *r == row)
    }
}

/// Draws snapshots to a ratatui terminal.
pub struct TerminalSink<B: Backend> {
    pub terminal: Terminal<B>,
    pub flashes: RowFlashes,
    flash_duration: Duration,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>, flash_duration: Duration) -> Self {
        Self {
            terminal,
            flashes: RowFlashes::default(),
            flash_duration,
        }
    }
}

impl<B: Backend> RenderSink for TerminalSink<B> {
    type Error = io::Error;

    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let now = Instant::now();
        self.flashes.prune(now, self.flash_duration);
        self.flashes.record(&snapshot.cleared_rows, now);

        let flashes = &self.flashes;
        self.terminal.draw(|f| render(f, snapshot, flashes))?;
        Ok(())
    }
}

pub fn render(f: &mut Frame, snapshot: &Snapshot, flashes: &RowFlashes) {
    let area = f.area();
    if area.width < BOARD_WIDTH + INFO_WIDTH || area.height < BOARD_HEIGHT {
        let warning = Paragraph::new("Terminal too small!\nPlease resize your terminal.")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(warning, area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH),
            Constraint::Length(INFO_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area);

    let board_area = Rect {
        height: BOARD_HEIGHT,
        ..main_layout[0]
    };
    render_board(f, snapshot, flashes, board_area);
    render_info(f, snapshot, main_layout[1]);

    if snapshot.show_start {
        render_banner(f, board_area, START_TEXT, Color::White);
    } else if snapshot.show_game_over {
        render_banner(f, board_area, GAME_OVER_TEXT, Color::Red);
    }
}

fn render_board(f: &mut Frame, snapshot: &Snapshot, flashes: &RowFlashes, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("BLOCKFALL");
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (y, row) in snapshot.cells.iter().enumerate() {
        let flashing = flashes.is_flashing(y);
        for (x, cell) in row.iter().enumerate() {
            let color = if flashing {
                Color::White
            } else {
                piece_color(*cell)
            };
            let symbol = if cell.is_some() || flashing { "█" } else { "·" };
            draw_cell(
                f,
                inner.left() + x as u16 * CELL_WIDTH,
                inner.top() + y as u16,
                symbol,
                color,
            );
        }
    }
}

fn render_info(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(15), // Queue
            Constraint::Length(3), // Lines and rate
            Constraint::Min(0),    // Controls
        ])
        .split(area);

    f.render_widget(
        Paragraph::new("NEXT").alignment(Alignment::Center),
        layout[0],
    );

    for (slot, (piece, mask)) in snapshot.queue.iter().enumerate() {
        let top = layout[1].top() + slot as u16 * (MASK_SIZE as u16 + 1);
        // Only the piece coming up next is drawn at full strength
        let modifier = if slot == 0 {
            Modifier::empty()
        } else {
            Modifier::DIM
        };
        render_mask(f, *piece, mask, layout[1].left() + 4, top, modifier);
    }

    let stats = Paragraph::new(format!("{}\n{}", snapshot.lines_text, snapshot.rate_text))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(stats, layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move\n\
        ↓: Fast drop / start\n\
        ↑/T: Rotate right\n\
        R: Rotate left\n\
        Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, layout[3]);
}

fn render_mask(
    f: &mut Frame,
    piece: PieceType,
    mask: &ShapeMask,
    left: u16,
    top: u16,
    modifier: Modifier,
) {
    for row in 0..MASK_SIZE {
        for col in 0..MASK_SIZE {
            let (symbol, color) = if mask.is_set(row, col) {
                ("█", piece_color(Some(piece)))
            } else {
                (" ", piece_color(None))
            };
            let x = left + col as u16 * CELL_WIDTH;
            draw_cell(f, x, top + row as u16, symbol, color);
            set_modifier(f, x, top + row as u16, modifier);
        }
    }
}

fn draw_cell(f: &mut Frame, x: u16, y: u16, symbol: &str, color: Color) {
    // Each cell is 2x1 characters to make it more square-like
    for dx in 0..CELL_WIDTH {
        if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

fn set_modifier(f: &mut Frame, x: u16, y: u16, modifier: Modifier) {
    for dx in 0..CELL_WIDTH {
        if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
            cell.modifier = modifier;
        }
    }
}

fn render_banner(f: &mut Frame, board: Rect, text: &str, color: Color) {
    let height = text.lines().count() as u16 + 2;
    let area = Rect {
        x: board.x,
        y: board.y + board.height.saturating_sub(height) / 2,
        width: board.width,
        height,
    };
    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(banner, area);
}
