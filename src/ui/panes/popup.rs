//! Popup overlay rendering

use crate::session::Popup;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Area inset by `margin` cells on every side, never smaller than 1x1
fn inset(area: Rect, margin: u16) -> Rect {
    let width = area.width.saturating_sub(margin * 2).max(1);
    let height = area.height.saturating_sub(margin * 2).max(1);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Draw `popup` above whatever is already in `area`
pub fn render_popup(frame: &mut Frame, area: Rect, popup: Popup) {
    if popup == Popup::None || area.width == 0 || area.height == 0 {
        return;
    }

    let popup_area = inset(area, 2);
    let block = Block::default()
        .title(popup.title())
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.instruction)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(DEFAULT_THEME.popup_bg).fg(DEFAULT_THEME.fg));

    let lines: Vec<Line> = popup.lines().iter().map(|l| Line::from(*l)).collect();

    frame.render_widget(Clear, popup_area);
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_is_centered() {
        let r = inset(Rect::new(0, 0, 40, 20), 2);
        assert_eq!(r, Rect::new(2, 2, 36, 16));
    }

    #[test]
    fn test_inset_small_area() {
        let r = inset(Rect::new(5, 5, 3, 3), 2);
        assert_eq!(r.width, 1);
        assert_eq!(r.height, 1);
    }

    #[test]
    fn test_inset_zero_sized_area() {
        let r = inset(Rect::new(0, 0, 0, 5), 2);
        assert_eq!(r.x, 0);
        let r = inset(Rect::new(3, 0, 7, 0), 2);
        assert_eq!(r.y, 0);
    }

    #[test]
    fn test_help_in_zero_width_area_draws_nothing() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(12, 10)).unwrap();
        terminal
            .draw(|f| render_popup(f, Rect::new(0, 0, 0, 9), Popup::Help))
            .unwrap();
        terminal
            .draw(|f| render_popup(f, Rect::new(0, 0, 12, 0), Popup::Help))
            .unwrap();
    }
}
