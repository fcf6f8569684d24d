//! Retrieval path: deep-linked /start payloads are resolved against the
//! storage chat and the item is forwarded back to the requester.

use tracing::{error, info};

use crate::{
    domain::{ChatId, MessageId},
    formatting::retrieval_caption,
    links::{parse_item_id, DeepLinks},
    relay::{
        delete_best_effort,
        port::RelayPort,
        types::{Delivered, LinkButton, RetrieveOutcome, StartRequest},
    },
    Result,
};

const WELCOME: &str = "Welcome! Please use a valid download link from our channel.";
const PREPARING: &str = "⏳ Preparing your file, please wait...";
const NOT_FOUND: &str = "❌ File not found or link expired. Please try again later.";
const DOWNLOAD_LABEL: &str = "⬇ Download Now";

/// Handle a /start command, with or without a deep-link payload.
///
/// Every failure mode of the lookup (malformed id, missing item, platform
/// trouble) renders as the same user message; the causes stay apart only in
/// the log.
pub async fn handle_start(
    port: &dyn RelayPort,
    links: &DeepLinks,
    req: StartRequest,
) -> RetrieveOutcome {
    // Clean-UI policy: the command message itself goes away first.
    if let Some(trigger) = req.trigger {
        delete_best_effort(port, trigger, "start command").await;
    }

    let Some(payload) = req
        .payload
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    else {
        let _ = port.send_html(req.chat_id, WELCOME).await;
        return RetrieveOutcome::Welcome;
    };

    // The placeholder goes out before the storage round trip so the user
    // sees immediate feedback.
    let placeholder = match port.send_html(req.chat_id, PREPARING).await {
        Ok(msg) => Some(msg),
        Err(e) => {
            error!(chat = req.chat_id.0, error = %e, "placeholder send failed");
            None
        }
    };

    match deliver(port, req.chat_id, payload).await {
        Ok((item, delivered)) => {
            if let Some(placeholder) = placeholder {
                delete_best_effort(port, placeholder, "placeholder").await;
            }

            let caption = retrieval_caption(&delivered.item);
            let url = delivered
                .link
                .clone()
                .unwrap_or_else(|| links.item_link(item));
            let button = LinkButton {
                label: DOWNLOAD_LABEL.to_string(),
                url,
            };
            if let Err(e) = port
                .send_html_with_button(req.chat_id, &caption, button)
                .await
            {
                // The file itself already reached the chat; reporting a
                // failure now would be wrong.
                error!(chat = req.chat_id.0, item = item.0, error = %e, "caption send failed");
            }

            info!(chat = req.chat_id.0, item = item.0, "stored item delivered");
            RetrieveOutcome::Delivered { item }
        }
        Err(e) => {
            if let Some(placeholder) = placeholder {
                delete_best_effort(port, placeholder, "placeholder").await;
            }

            let cause = e.kind();
            error!(chat = req.chat_id.0, cause, error = %e, "retrieval failed");
            let _ = port.send_html(req.chat_id, NOT_FOUND).await;
            RetrieveOutcome::Failed { cause }
        }
    }
}

async fn deliver(
    port: &dyn RelayPort,
    chat_id: ChatId,
    payload: &str,
) -> Result<(MessageId, Delivered)> {
    let item = parse_item_id(payload)?;
    let delivered = port.forward_from_storage(chat_id, item).await?;
    Ok((item, delivered))
}
