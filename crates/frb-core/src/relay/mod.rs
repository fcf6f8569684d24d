//! The three relay transactions: upload, retrieve, stats.
//!
//! Each is a stateless request/response flow over [`port::RelayPort`]; no
//! state survives an invocation, and no transaction's failure can affect
//! another.

pub mod port;
pub mod retrieve;
pub mod status;
pub mod types;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

use tracing::debug;

use crate::domain::MessageRef;

use self::port::RelayPort;

/// Delete a message whose removal is purely cosmetic.
///
/// Failure is ignored by contract, not by accident: no transaction outcome
/// may depend on a cleanup deletion succeeding.
pub(crate) async fn delete_best_effort(port: &dyn RelayPort, msg: MessageRef, what: &str) {
    if let Err(e) = port.delete_message(msg).await {
        debug!(
            chat = msg.chat_id.0,
            message = msg.message_id.0,
            error = %e,
            "best-effort delete of {what} failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{ChatId, MessageId, MessageRef, UserId},
        links::DeepLinks,
        relay::{
            retrieve, status,
            testing::RecordingRelay,
            types::{
                PayloadKind, RetrieveOutcome, StartRequest, StatsOutcome, StatsRequest,
                StoredItem, UploadOutcome, UploadRequest,
            },
            upload,
        },
    };

    fn test_config() -> crate::config::Config {
        crate::config::Config {
            telegram_bot_token: "token".to_string(),
            storage_chat_id: -1_002_000_000_001,
            operator_id: 42,
            public_url: None,
            webhook_port: 8080,
            audit_log_path: "/tmp/frb-test-audit.log".into(),
            audit_log_json: true,
        }
    }

    /// Full pass over the happy path: a privileged user uploads a document,
    /// a different user later redeems the link from the confirmation.
    #[tokio::test]
    async fn uploaded_document_is_retrievable_via_the_confirmed_link() {
        let relay = RecordingRelay::new().with_admin(true);
        *relay.upload_item.lock().unwrap() = Some(StoredItem {
            kind: PayloadKind::Document,
            file_name: Some("report.pdf".to_string()),
            byte_size: Some(2_097_152),
            mime_type: Some("application/pdf".to_string()),
        });
        let links = DeepLinks::new("relay_bot");

        let uploader_chat = ChatId(10);
        let out = upload::handle_upload(
            &relay,
            &links,
            UploadRequest {
                chat_id: uploader_chat,
                user_id: UserId(77),
                message: MessageRef {
                    chat_id: uploader_chat,
                    message_id: MessageId(5),
                },
                kind: Some(PayloadKind::Document),
            },
        )
        .await;

        let UploadOutcome::Relayed { item, link } = out else {
            panic!("expected a relayed upload, got {out:?}");
        };

        // A different user redeems the link's payload.
        let payload = link.rsplit_once("?start=").unwrap().1.to_string();
        let reader_chat = ChatId(900);
        let out = retrieve::handle_start(
            &relay,
            &links,
            StartRequest {
                chat_id: reader_chat,
                trigger: None,
                payload: Some(payload),
            },
        )
        .await;
        assert_eq!(out, RetrieveOutcome::Delivered { item });

        assert_eq!(relay.forwarded.lock().unwrap().as_slice(), &[(reader_chat, item)]);

        let buttons = relay.buttons.lock().unwrap();
        let (chat, caption, button) = buttons.last().expect("caption with button");
        assert_eq!(*chat, reader_chat);
        assert!(caption.contains("report.pdf"));
        assert!(caption.contains("2.0 MB"));
        assert!(caption.contains("application/pdf"));
        assert_eq!(button.url, link);
    }

    /// Operator gets the liveness ack; anyone else gets "Unauthorized." and
    /// nothing more.
    #[tokio::test]
    async fn stats_is_operator_only() {
        let cfg = test_config();
        let relay = RecordingRelay::new();

        let out = status::handle_stats(
            &cfg,
            &relay,
            StatsRequest {
                chat_id: ChatId(1),
                user_id: UserId(42),
                first_name: "Ada".to_string(),
            },
        )
        .await;
        assert_eq!(out, StatsOutcome::Acknowledged);

        let out = status::handle_stats(
            &cfg,
            &relay,
            StatsRequest {
                chat_id: ChatId(2),
                user_id: UserId(43),
                first_name: "Mallory".to_string(),
            },
        )
        .await;
        assert_eq!(out, StatsOutcome::Rejected);

        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].1.contains("Ada"));
        assert!(sent[0].1.contains("running smoothly"));
        assert_eq!(sent[1].1, "Unauthorized.");
        assert!(relay.forwarded.lock().unwrap().is_empty());
        assert!(relay.relayed.lock().unwrap().is_empty());
    }
}
