use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Suggested prompts shown before the first exchange.
#[derive(Debug)]
pub struct PromptCards {
    pub prompts: Vec<String>,
    pub selected_idx: usize,
}

impl PromptCards {
    pub fn new(prompts: Vec<String>) -> Self {
        Self {
            prompts,
            selected_idx: 0,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.prompts.get(self.selected_idx).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if !self.prompts.is_empty() {
            self.selected_idx = (self.selected_idx + 1) % self.prompts.len();
        }
    }

    pub fn select_previous(&mut self) {
        if self.prompts.is_empty() {
            return;
        }
        if self.selected_idx == 0 {
            self.selected_idx = self.prompts.len() - 1;
        } else {
            self.selected_idx -= 1;
        }
    }

    /// Moves the highlight. Returns true when the key was consumed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Tab) => {
                self.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                self.select_previous();
                true
            }
            _ => false,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        if self.prompts.is_empty() {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.prompts
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(area);

        for (i, (prompt, row)) in self.prompts.iter().zip(rows.iter()).enumerate() {
            let selected = i == self.selected_idx;
            let style = if selected {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let card = Paragraph::new(Line::from(Span::styled(
                format!("{} {}", if selected { "▶" } else { " " }, prompt),
                style,
            )))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );

            f.render_widget(card, *row);
        }
    }
}
