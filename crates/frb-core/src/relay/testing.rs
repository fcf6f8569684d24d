//! In-memory [`RelayPort`] for transaction tests.
//!
//! Records every side effect so tests can assert on what did NOT happen as
//! well as on what did.

use std::sync::{
    atomic::{AtomicI32, Ordering},
    Mutex,
};

use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    relay::{
        port::RelayPort,
        types::{Delivered, LinkButton, PayloadKind, StoredItem},
    },
    Result,
};

#[derive(Default)]
pub struct RecordingRelay {
    pub admin: bool,
    pub admin_check_fails: bool,
    pub relay_fails: bool,
    pub forward_fails: bool,

    /// Metadata attached to the next relayed upload (what a forward of that
    /// item will report back).
    pub upload_item: Mutex<Option<StoredItem>>,

    /// Items "in storage", keyed by the id relaying assigned.
    pub stored: Mutex<Vec<(MessageId, StoredItem)>>,

    // Recorded side effects.
    pub relayed: Mutex<Vec<MessageRef>>,
    pub forwarded: Mutex<Vec<(ChatId, MessageId)>>,
    pub sent: Mutex<Vec<(ChatId, String)>>,
    pub buttons: Mutex<Vec<(ChatId, String, LinkButton)>>,
    pub deleted: Mutex<Vec<MessageRef>>,

    next_message_id: AtomicI32,
    next_item_id: AtomicI32,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(500),
            next_item_id: AtomicI32::new(1),
            ..Default::default()
        }
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Put an item into "storage" directly, as if relayed earlier.
    pub fn seed_item(&self, item: StoredItem) -> MessageId {
        let id = MessageId(self.next_item_id.fetch_add(1, Ordering::SeqCst));
        self.stored.lock().unwrap().push((id, item));
        id
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn next_message(&self, chat_id: ChatId) -> MessageRef {
        MessageRef {
            chat_id,
            message_id: MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst)),
        }
    }
}

#[async_trait]
impl RelayPort for RecordingRelay {
    async fn is_storage_admin(&self, _user: UserId) -> Result<bool> {
        if self.admin_check_fails {
            return Err(Error::Platform("member query failed".to_string()));
        }
        Ok(self.admin)
    }

    async fn relay_to_storage(&self, src: MessageRef) -> Result<MessageId> {
        if self.relay_fails {
            return Err(Error::Platform("copy into storage failed".to_string()));
        }
        self.relayed.lock().unwrap().push(src);

        let item = self
            .upload_item
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| StoredItem::of_kind(PayloadKind::Other));
        let id = MessageId(self.next_item_id.fetch_add(1, Ordering::SeqCst));
        self.stored.lock().unwrap().push((id, item));
        Ok(id)
    }

    async fn forward_from_storage(&self, dest: ChatId, item: MessageId) -> Result<Delivered> {
        if self.forward_fails {
            return Err(Error::Platform("telegram error: network".to_string()));
        }

        let stored = self
            .stored
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == item)
            .map(|(_, it)| it.clone());
        let Some(stored) = stored else {
            return Err(Error::NotFound(item));
        };

        self.forwarded.lock().unwrap().push((dest, item));
        Ok(Delivered {
            message: self.next_message(dest),
            item: stored,
            link: None,
        })
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.sent.lock().unwrap().push((chat_id, html.to_string()));
        Ok(self.next_message(chat_id))
    }

    async fn send_html_with_button(
        &self,
        chat_id: ChatId,
        html: &str,
        button: LinkButton,
    ) -> Result<MessageRef> {
        self.buttons
            .lock()
            .unwrap()
            .push((chat_id, html.to_string(), button));
        Ok(self.next_message(chat_id))
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.deleted.lock().unwrap().push(msg);
        Ok(())
    }
}
