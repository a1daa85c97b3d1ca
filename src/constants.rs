// UI Constants
pub const USER_INDENT: &str = "  ";
pub const INPUT_PROMPT: &str = "→ ";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub const GREETING_TITLE: &str = "Hello 👋";
pub const GREETING_HEADLINE: &str = "What would you like to know?";
pub const GREETING_HINT: &str = "Use one of the most common prompts below or type your own.";

// Conversation Constants
pub const DEFAULT_GREETING: &str = "Hi there! I'm your AI assistant. How can I help you today?";
pub const LOADING_TEXT: &str = "Thinking...";
pub const WARNING_GLYPH: &str = "⚠️";

// API Constants
pub const CHAT_API_PATH: &str = "/api/chat";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";
pub const ENDPOINT_ENV_VAR: &str = "CHATDESK_ENDPOINT";
