use crate::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Submit(String),
    SelectPrompt(String),
}

/// Edits the input buffer and maps keys to page actions. `showing_prompts`
/// routes arrow keys and an empty Enter to the prompt cards.
pub fn handle_chat_input(key: KeyEvent, app: &mut App, showing_prompts: bool) -> KeyAction {
    if showing_prompts && app.prompt_cards.handle_input(key) {
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => {
            if !app.input.trim().is_empty() {
                KeyAction::Submit(app.input.clone())
            } else if showing_prompts {
                app.prompt_cards
                    .selected()
                    .map(|prompt| KeyAction::SelectPrompt(prompt.to_string()))
                    .unwrap_or(KeyAction::None)
            } else {
                KeyAction::None
            }
        }
        KeyCode::PageUp => {
            app.scroll_up();
            KeyAction::None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            KeyAction::None
        }
        KeyCode::Backspace => {
            app.input.pop();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => return KeyAction::Quit,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
