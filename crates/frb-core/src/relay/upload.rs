//! Upload path: storage admins relay files into the storage chat and get a
//! shareable deep link back.

use tracing::{error, info, warn};

use crate::{
    links::DeepLinks,
    relay::{
        delete_best_effort,
        port::RelayPort,
        types::{LinkButton, UploadOutcome, UploadRequest},
    },
};

const UPLOAD_FAILED: &str = "❌ Upload failed. Please try again later.";
const SHARE_LABEL: &str = "🔗 Share link";

/// Handle a non-command message that may be an upload attempt.
///
/// Unauthorized senders get no reply at all, and neither do senders whose
/// privilege could not be verified: the privileged path must not be
/// discoverable by probing.
pub async fn handle_upload(
    port: &dyn RelayPort,
    links: &DeepLinks,
    req: UploadRequest,
) -> UploadOutcome {
    let Some(kind) = req.kind else {
        return UploadOutcome::Ignored;
    };

    match port.is_storage_admin(req.user_id).await {
        Ok(true) => {}
        Ok(false) => {
            info!(user = req.user_id.0, "upload dropped: sender is not a storage admin");
            return UploadOutcome::Denied;
        }
        Err(e) => {
            warn!(user = req.user_id.0, error = %e, "upload dropped: privilege check failed");
            return UploadOutcome::Denied;
        }
    }

    let item = match port.relay_to_storage(req.message).await {
        Ok(id) => id,
        Err(e) => {
            let cause = e.kind();
            error!(user = req.user_id.0, cause, error = %e, "relay into storage failed");
            let _ = port.send_html(req.chat_id, UPLOAD_FAILED).await;
            return UploadOutcome::Failed { cause };
        }
    };

    let link = links.item_link(item);
    let confirmation = format!("✅ File stored.\n\n🔗 {link}");
    let button = LinkButton {
        label: SHARE_LABEL.to_string(),
        url: link.clone(),
    };
    if let Err(e) = port
        .send_html_with_button(req.chat_id, &confirmation, button)
        .await
    {
        // The item is stored either way; the uploader just misses the link.
        error!(user = req.user_id.0, item = item.0, error = %e, "upload confirmation failed");
    }

    delete_best_effort(port, req.message, "original upload message").await;

    info!(user = req.user_id.0, item = item.0, kind = ?kind, "upload relayed");
    UploadOutcome::Relayed { item, link }
}
