use crate::domain::{ChatId, MessageId, MessageRef, UserId};

/// Payload classes the upload path accepts, plus `Other` for whatever a
/// forwarded message turns out to contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    Document,
    Video,
    Audio,
    Other,
}

/// Metadata of a message living in the storage chat.
///
/// Telegram owns the message itself; this is only what captions are built
/// from, read off the forwarded copy.
#[derive(Clone, Debug)]
pub struct StoredItem {
    pub kind: PayloadKind,
    pub file_name: Option<String>,
    pub byte_size: Option<u64>,
    pub mime_type: Option<String>,
}

impl StoredItem {
    pub fn of_kind(kind: PayloadKind) -> Self {
        Self {
            kind,
            file_name: None,
            byte_size: None,
            mime_type: None,
        }
    }
}

/// A stored item that has been forwarded into a user conversation.
#[derive(Clone, Debug)]
pub struct Delivered {
    pub message: MessageRef,
    pub item: StoredItem,
    /// Link Telegram assigned to the forwarded copy, when the destination
    /// chat has shareable links at all.
    pub link: Option<String>,
}

/// Single-URL-button attachment for an outgoing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub message: MessageRef,
    /// Supported attachment carried by the message, if any; `None` means
    /// the message is not an upload attempt.
    pub kind: Option<PayloadKind>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Not an upload attempt (no supported attachment); nothing happens.
    Ignored,
    /// Sender is not a storage admin, or the privilege query failed.
    /// Deliberately no observable effect either way.
    Denied,
    Relayed { item: MessageId, link: String },
    Failed { cause: &'static str },
}

#[derive(Clone, Debug)]
pub struct StartRequest {
    pub chat_id: ChatId,
    /// The /start message itself, when it still exists to be cleaned up.
    pub trigger: Option<MessageRef>,
    /// Raw deep-link payload, if the command carried one.
    pub payload: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetrieveOutcome {
    Welcome,
    Delivered { item: MessageId },
    Failed { cause: &'static str },
}

#[derive(Clone, Debug)]
pub struct StatsRequest {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub first_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsOutcome {
    Acknowledged,
    Rejected,
}
