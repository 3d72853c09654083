//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles commands and free-text ingredient lists
//! - `callback_handler`: Handles filter toggles and "cooked" buttons
//! - `ui_builder`: Creates keyboards and formats result cards

pub mod callback_handler;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

pub use callback_handler::CallbackAction;
pub use message_handler::{apply_message, send_matches, Command, Reply};
