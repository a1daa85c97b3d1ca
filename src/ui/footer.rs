use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draws the footer with the keys that apply to the current view.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, showing_prompts: bool) {
    let instructions = if showing_prompts {
        "Up/Down to pick a prompt, Enter to send it or your own text. Esc to quit."
    } else {
        "Enter to send. PageUp/PageDown to scroll. Esc to quit."
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
