//! Status bar rendering with keybindings and state indicators

use crate::interpreter::constants::Cell;
use crate::session::{Mode, SessionView};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Describe a cell value for the status bar: the number and, if printable, the glyph
pub fn describe_value(value: Cell) -> String {
    match u8::try_from(value) {
        Ok(b @ 32..=126) => format!("{} '{}'", value, b as char),
        _ => value.to_string(),
    }
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, view: &SessionView) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let bar_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);

    let (badge, badge_bg) = if view.halted && view.mode == Mode::Editing {
        ("HALT", DEFAULT_THEME.error)
    } else {
        let bg = match view.mode {
            Mode::Editing => DEFAULT_THEME.primary,
            Mode::Running => DEFAULT_THEME.success,
            Mode::HelpPopup => DEFAULT_THEME.secondary,
        };
        (view.mode.label(), bg)
    };

    let mut left_spans = vec![
        Span::styled(
            format!(" {} ", badge),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" value: {} ", describe_value(view.current_value)),
            bar_style.fg(DEFAULT_THEME.fg),
        ),
    ];
    if view.string_mode {
        left_spans.push(Span::styled(
            " STR ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black),
        ));
    }
    left_spans.push(Span::styled(" | ", sep_style));
    left_spans.push(Span::styled(
        format!(" {} ", view.status),
        bar_style.fg(if view.error.is_some() {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.fg
        }),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_style)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_style.fg(DEFAULT_THEME.fg);

    let right_spans = vec![
        Span::styled(" ⇥ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ↵ ", key_style),
        Span::styled(" run ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" F1 ", key_style),
        Span::styled(" help ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ^Q ", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled(format!(" #{} ", view.steps), sep_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_style)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
