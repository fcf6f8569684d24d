//! Telegram adapter (teloxide).
//!
//! This crate implements the `frb-core` RelayPort over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    ApiError, RequestError,
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use frb_core::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    relay::{
        port::RelayPort,
        types::{Delivered, LinkButton, PayloadKind, StoredItem},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramRelay {
    bot: Bot,
    storage_chat: teloxide::types::ChatId,
}

impl TelegramRelay {
    pub fn new(bot: Bot, storage_chat_id: i64) -> Self {
        Self {
            bot,
            storage_chat: teloxide::types::ChatId(storage_chat_id),
        }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: RequestError) -> Error {
        Error::Platform(format!("telegram error: {e}"))
    }

    /// Expired and never-assigned ids look the same to Telegram; both map to
    /// the not-found cause.
    fn map_forward_err(item: MessageId, e: RequestError) -> Error {
        match e {
            RequestError::Api(ApiError::MessageToForwardNotFound | ApiError::MessageIdInvalid) => {
                Error::NotFound(item)
            }
            other => Self::map_err(other),
        }
    }

    async fn with_retry<T, Fut>(
        &self,
        mut op: impl FnMut() -> Fut,
    ) -> std::result::Result<T, RequestError>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(other),
                },
            }
        }
    }
}

fn stored_item_of(msg: &Message) -> StoredItem {
    if let Some(doc) = msg.document() {
        return StoredItem {
            kind: PayloadKind::Document,
            file_name: doc.file_name.clone(),
            byte_size: Some(doc.file.size as u64),
            mime_type: doc.mime_type.as_ref().map(|m| m.to_string()),
        };
    }
    if msg.video().is_some() {
        return StoredItem::of_kind(PayloadKind::Video);
    }
    if msg.audio().is_some() {
        return StoredItem::of_kind(PayloadKind::Audio);
    }
    StoredItem::of_kind(PayloadKind::Other)
}

#[async_trait]
impl RelayPort for TelegramRelay {
    async fn is_storage_admin(&self, user: UserId) -> Result<bool> {
        // Telegram user ids are positive; anything else cannot be a member.
        let Ok(user_id) = u64::try_from(user.0) else {
            return Ok(false);
        };

        let member = self
            .with_retry(|| {
                self.bot
                    .get_chat_member(self.storage_chat, teloxide::types::UserId(user_id))
            })
            .await
            .map_err(Self::map_err)?;

        Ok(member.kind.is_privileged())
    }

    async fn relay_to_storage(&self, src: MessageRef) -> Result<MessageId> {
        let copied = self
            .with_retry(|| {
                self.bot.copy_message(
                    self.storage_chat,
                    Self::tg_chat(src.chat_id),
                    Self::tg_msg_id(src.message_id),
                )
            })
            .await
            .map_err(Self::map_err)?;

        Ok(MessageId(copied.0))
    }

    async fn forward_from_storage(&self, dest: ChatId, item: MessageId) -> Result<Delivered> {
        let msg = self
            .with_retry(|| {
                self.bot
                    .forward_message(Self::tg_chat(dest), self.storage_chat, Self::tg_msg_id(item))
                    .disable_notification(true)
            })
            .await
            .map_err(|e| Self::map_forward_err(item, e))?;

        Ok(Delivered {
            message: MessageRef {
                chat_id: dest,
                message_id: MessageId(msg.id.0),
            },
            item: stored_item_of(&msg),
            link: msg.url().map(|u| u.to_string()),
        })
    }

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html)
            })
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_html_with_button(
        &self,
        chat_id: ChatId,
        html: &str,
        button: LinkButton,
    ) -> Result<MessageRef> {
        let url = url::Url::parse(&button.url)
            .map_err(|e| Error::Platform(format!("invalid button url {:?}: {e}", button.url)))?;
        let markup =
            InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(button.label, url)]]);

        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html)
                    .reply_markup(markup.clone())
            })
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn delete_message(&self, msg: MessageRef) -> Result<()> {
        self.with_retry(|| {
            self.bot
                .delete_message(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
        })
        .await
        .map_err(Self::map_err)?;
        Ok(())
    }
}
