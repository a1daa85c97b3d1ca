use crate::controller::ChatController;
use crate::prompt_cards::PromptCards;
use crate::status_indicator::StatusIndicator;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State of the terminal chat page around the controller.
pub struct App {
    pub controller: Arc<Mutex<ChatController>>,
    pub input: String,
    pub prompt_cards: PromptCards,
    pub status_indicator: StatusIndicator,
    pub chat_scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: ChatController, prompts: Vec<String>) -> App {
        App {
            controller: Arc::new(Mutex::new(controller)),
            input: String::new(),
            prompt_cards: PromptCards::new(prompts),
            status_indicator: StatusIndicator::new(),
            chat_scroll: 0,
            should_quit: false,
        }
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Pins the view to the newest line; clamped when drawn.
    pub fn scroll_to_latest(&mut self) {
        self.chat_scroll = u16::MAX;
    }

    /// Starts a submission. The request runs on its own task so the page
    /// keeps drawing; returns false when the controller refused the text.
    pub async fn send(&mut self, text: &str) -> bool {
        let pending = self.controller.lock().await.begin_submit(text);

        let Some(pending) = pending else {
            if !text.trim().is_empty() {
                self.status_indicator
                    .set_status("Still waiting for the previous reply");
            }
            return false;
        };

        self.status_indicator.clear_status();
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            let settled = pending.settle().await;
            controller.lock().await.resolve(settled);
        });

        true
    }
}
