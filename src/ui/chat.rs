use crate::chat_message::render_message;
use crate::constants::INPUT_PROMPT;
use crate::models::Message;
use crate::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws the message list, clamping `app.chat_scroll` to the content.
pub fn draw_messages(f: &mut Frame<'_>, app: &mut App, messages: &[Message], area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area.width));
    }

    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(area.height);
    app.chat_scroll = app.chat_scroll.min(max_scroll);

    f.render_widget(Paragraph::new(lines).scroll((app.chat_scroll, 0)), area);
}

pub fn draw_input(f: &mut Frame<'_>, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    let separator_style = Style::default().fg(Color::DarkGray);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.clone(), separator_style))),
        Rect { height: 1, ..area },
    );

    let prompt_width = INPUT_PROMPT.width() as u16;
    let visible_width = area.width.saturating_sub(prompt_width + 1);
    let text_width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    let input = Line::from(vec![
        Span::styled(INPUT_PROMPT, Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
    ]);

    let input_row = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    f.render_widget(Paragraph::new(input).scroll((0, scroll_offset)), input_row);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator, separator_style))),
        Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        },
    );

    let cursor_x = area.x + prompt_width + (text_width - scroll_offset);
    f.set_cursor_position((cursor_x, input_row.y));
}
