//! Program grid pane
//!
//! Each cell takes two terminal columns: the glyph and a gap. The pointer cell
//! is drawn in reverse colors. Row and column 0 of the torus get a tinted
//! background so the wrap seam is visible while scrolling around. Cells that
//! are not printable ASCII show as a red `?`.

use crate::interpreter::constants::Cell;
use crate::interpreter::instruction::Instruction;
use crate::session::SessionView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Terminal columns used per grid cell
const CELL_COLUMNS: u16 = 2;

/// How many cells fit inside a bordered pane of this size, as `(cols, rows)`
pub fn grid_window_size(area: Rect) -> (usize, usize) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    (
        (inner_width / CELL_COLUMNS).max(1) as usize,
        inner_height.max(1) as usize,
    )
}

fn glyph(cell: Cell) -> (char, Style) {
    match u8::try_from(cell) {
        Ok(b' ') => (' ', Style::default()),
        Ok(b @ 33..=126) => {
            let c = b as char;
            let style = match Instruction::decode(cell) {
                Some(Instruction::Digit(_)) => Style::default().fg(DEFAULT_THEME.number),
                Some(_) => Style::default().fg(DEFAULT_THEME.instruction),
                None => Style::default().fg(DEFAULT_THEME.fg),
            };
            (c, style)
        }
        _ => (
            '?',
            Style::default()
                .fg(Color::White)
                .bg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

/// Render the program window
pub fn render_grid_pane(frame: &mut Frame, area: Rect, view: &SessionView) {
    let title = format!(
        " Program ({}, {}) {} ",
        view.pointer.x,
        view.pointer.y,
        view.direction.arrow()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines: Vec<Line> = view
        .cells
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let row_seam = view.is_row_seam(row);
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, &cell)| {
                    let (c, mut style) = glyph(cell);
                    if (col, row) == view.cursor {
                        style = Style::default()
                            .fg(Color::Black)
                            .bg(if view.halted {
                                DEFAULT_THEME.error
                            } else if view.string_mode {
                                DEFAULT_THEME.secondary
                            } else {
                                DEFAULT_THEME.primary
                            })
                            .add_modifier(Modifier::BOLD);
                    } else if (row_seam || view.is_column_seam(col)) && style.bg.is_none() {
                        style = style.bg(DEFAULT_THEME.seam_bg);
                    }
                    Span::styled(format!("{} ", c), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
