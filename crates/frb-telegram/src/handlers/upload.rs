use std::sync::Arc;

use teloxide::prelude::*;

use frb_core::{
    audit::AuditEvent,
    domain::{ChatId, MessageId, MessageRef, UserId},
    relay::{
        types::{PayloadKind, UploadOutcome, UploadRequest},
        upload,
    },
};

use crate::router::AppState;

/// The upload path accepts exactly one of document / video / audio.
fn attachment_kind(msg: &Message) -> Option<PayloadKind> {
    if msg.document().is_some() {
        return Some(PayloadKind::Document);
    }
    if msg.video().is_some() {
        return Some(PayloadKind::Video);
    }
    if msg.audio().is_some() {
        return Some(PayloadKind::Audio);
    }
    None
}

pub async fn handle_upload(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    // Uploads must come from an identifiable user account.
    let Some(user) = msg.from() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let user_id = user.id.0 as i64;
    let req = UploadRequest {
        chat_id,
        user_id: UserId(user_id),
        message: MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        },
        kind: attachment_kind(&msg),
    };

    match upload::handle_upload(state.relay.as_ref(), &state.links, req).await {
        UploadOutcome::Relayed { item, .. } => {
            let _ = state
                .audit
                .write(AuditEvent::upload_relayed(user_id, item.0));
        }
        UploadOutcome::Denied => {
            let _ = state.audit.write(AuditEvent::upload_denied(user_id));
        }
        UploadOutcome::Failed { cause } => {
            let _ = state.audit.write(AuditEvent::upload_failed(user_id, cause));
        }
        UploadOutcome::Ignored => {}
    }

    Ok(())
}
