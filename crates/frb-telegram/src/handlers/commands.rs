use std::sync::Arc;

use teloxide::prelude::*;

use frb_core::{
    audit::AuditEvent,
    domain::{ChatId, MessageId, MessageRef, UserId},
    relay::{
        retrieve, status,
        types::{RetrieveOutcome, StartRequest, StatsOutcome, StatsRequest},
    },
};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let (cmd, args) = parse_command(text);
    match cmd.as_str() {
        "start" => start(&msg, &state, args).await,
        "stats" => stats(&msg, &state).await,
        // Anything else is not ours; stay silent.
        _ => {}
    }

    Ok(())
}

async fn start(msg: &Message, state: &AppState, args: String) {
    let chat_id = ChatId(msg.chat.id.0);
    let req = StartRequest {
        chat_id,
        trigger: Some(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        }),
        // Only the first token counts as the deep-link payload.
        payload: args.split_whitespace().next().map(|s| s.to_string()),
    };

    match retrieve::handle_start(state.relay.as_ref(), &state.links, req).await {
        RetrieveOutcome::Delivered { item } => {
            let _ = state
                .audit
                .write(AuditEvent::retrieve_served(chat_id.0, item.0));
        }
        RetrieveOutcome::Failed { cause } => {
            let _ = state
                .audit
                .write(AuditEvent::retrieve_failed(chat_id.0, cause));
        }
        RetrieveOutcome::Welcome => {}
    }
}

async fn stats(msg: &Message, state: &AppState) {
    let Some(user) = msg.from() else {
        return;
    };

    let user_id = user.id.0 as i64;
    let req = StatsRequest {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user_id),
        first_name: user.first_name.clone(),
    };

    let outcome = status::handle_stats(&state.cfg, state.relay.as_ref(), req).await;
    let authorized = matches!(outcome, StatsOutcome::Acknowledged);
    let _ = state.audit.write(AuditEvent::stats(user_id, authorized));
}
