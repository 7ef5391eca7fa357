//! Operand stack pane
//!
//! Shows at most nine lines, newest value at the bottom. When the stack holds
//! more than fit, the oldest visible line is replaced by a `^^^^^^` marker.
//! Values wider than the pane are clipped and end in `>`.

use crate::interpreter::constants::Cell;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Most lines the pane ever shows, marker included
pub const MAX_STACK_SHOWN: usize = 9;

/// Format the lines for a stack pane with `height` rows of `width` columns
pub fn stack_lines(stack: &[Cell], width: usize, height: usize) -> Vec<String> {
    let height = height.min(MAX_STACK_SHOWN);
    if height == 0 {
        return Vec::new();
    }

    let truncated = stack.len() > height;
    let shown = if truncated { height - 1 } else { stack.len() };
    let mut lines = Vec::with_capacity(height);
    if truncated {
        lines.push("^".repeat(width.clamp(1, 6)));
    }

    for value in &stack[stack.len() - shown..] {
        let text = value.to_string();
        if text.chars().count() > width && width > 0 {
            let clipped: String = text.chars().take(width - 1).collect();
            lines.push(format!("{}>", clipped));
        } else {
            lines.push(text);
        }
    }
    lines
}

/// Render the stack pane
pub fn render_stack_pane(frame: &mut Frame, area: Rect, stack: &[Cell]) {
    let block = Block::default()
        .title(format!(" Stack [{}] ", stack.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let height = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = stack_lines(stack, width, height)
        .into_iter()
        .map(|line| {
            let style = if line.starts_with('^') {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.number)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
