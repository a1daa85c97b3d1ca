use crate::constants::{GREETING_HEADLINE, GREETING_HINT, GREETING_TITLE};
use crate::prompt_cards::PromptCards;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Welcome block shown instead of the message list before the first
/// exchange: greeting text, headline, hint, then the prompt cards.
pub fn draw_greeting(f: &mut Frame<'_>, area: Rect, greeting: &str, cards: &PromptCards) {
    let cards_height = (cards.prompts.len() as u16).saturating_mul(3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(cards_height),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::styled(greeting.to_string(), Style::default().fg(Color::Rgb(144, 238, 144))),
        Line::from(""),
        Line::styled(GREETING_TITLE, Style::default().fg(Color::White)),
        Line::styled(
            GREETING_HEADLINE,
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(GREETING_HINT, Style::default().fg(Color::DarkGray)),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let cards_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(chunks[2])[1];

    cards.draw(f, cards_area);
}
