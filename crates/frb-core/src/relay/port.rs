use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    relay::types::{Delivered, LinkButton},
    Result,
};

/// Platform seam for the relay transactions.
///
/// Telegram is the first implementation; everything the handlers need from
/// the platform goes through here so the transaction logic stays testable
/// without a network.
#[async_trait]
pub trait RelayPort: Send + Sync {
    /// Live check: does `user` currently hold administrator or owner
    /// privilege in the storage chat? Queried per transaction, never cached.
    async fn is_storage_admin(&self, user: UserId) -> Result<bool>;

    /// Copy a message into the storage chat, returning the id the platform
    /// assigned to the stored copy.
    async fn relay_to_storage(&self, src: MessageRef) -> Result<MessageId>;

    /// Forward a stored item to `dest` with notification suppressed.
    async fn forward_from_storage(&self, dest: ChatId, item: MessageId) -> Result<Delivered>;

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    async fn send_html_with_button(
        &self,
        chat_id: ChatId,
        html: &str,
        button: LinkButton,
    ) -> Result<MessageRef>;

    async fn delete_message(&self, msg: MessageRef) -> Result<()>;
}
