// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod prompt_cards;
pub mod replies;
pub mod status_indicator;
pub mod ui;

pub use app::App;
pub use controller::ChatController;
