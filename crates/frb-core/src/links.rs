//! Deep links: the only addressing scheme the bot exposes to end users.
//!
//! A link embeds the storage-chat message id in decimal, nothing else. There
//! is no secondary mapping table, so link validity is entirely delegated to
//! Telegram's retention of the storage chat.

use crate::{domain::MessageId, errors::Error, Result};

/// Builds `t.me` deep links for stored items.
#[derive(Clone, Debug)]
pub struct DeepLinks {
    bot_username: String,
}

impl DeepLinks {
    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
        }
    }

    /// Shareable link that triggers retrieval of `item`.
    pub fn item_link(&self, item: MessageId) -> String {
        format!("https://t.me/{}?start={}", self.bot_username, item.0)
    }
}

/// Parse a `/start` payload back into a storage message id.
///
/// Malformed payloads must stay indistinguishable from missing items for the
/// user; callers render both through the same failure message.
pub fn parse_item_id(payload: &str) -> Result<MessageId> {
    let raw = payload.trim();
    raw.parse::<i32>()
        .map(MessageId)
        .map_err(|_| Error::BadIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_payload(link: &str) -> &str {
        link.rsplit_once("?start=").map(|(_, p)| p).unwrap_or("")
    }

    #[test]
    fn link_format() {
        let links = DeepLinks::new("file_relay_bot");
        assert_eq!(
            links.item_link(MessageId(7)),
            "https://t.me/file_relay_bot?start=7"
        );
    }

    #[test]
    fn link_round_trips_item_id() {
        let links = DeepLinks::new("file_relay_bot");
        for id in [1, 42, 987_654, i32::MAX] {
            let link = links.item_link(MessageId(id));
            assert_eq!(
                parse_item_id(start_payload(&link)).unwrap(),
                MessageId(id)
            );
        }
    }

    #[test]
    fn rejects_malformed_payloads() {
        for bad in ["", "abc", "12abc", "1.5", "0x10", "99999999999999999999"] {
            assert!(
                matches!(parse_item_id(bad), Err(Error::BadIdentifier(_))),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_item_id(" 123 ").unwrap(), MessageId(123));
    }
}
