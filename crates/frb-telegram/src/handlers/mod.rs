//! Telegram update handlers.
//!
//! Commands (/start, /stats) route through `commands`; every other message
//! is a potential upload.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::router::AppState;

mod commands;
mod upload;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(msg, state).await;
        }
    }

    upload::handle_upload(msg, state).await
}
