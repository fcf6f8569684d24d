use std::{net::SocketAddr, sync::Arc};

use teloxide::{
    dispatching::Dispatcher, dptree, error_handlers::LoggingErrorHandler, prelude::*,
    update_listeners::webhooks,
};

use tracing::info;

use frb_core::{audit::AuditLogger, config::Config, links::DeepLinks, relay::port::RelayPort};

use crate::handlers;
use crate::TelegramRelay;

/// Shared immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub relay: Arc<dyn RelayPort>,
    pub links: DeepLinks,
    pub audit: Arc<AuditLogger>,
}

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let me = bot.get_me().await?;
    info!(
        bot = me.username(),
        storage_chat = cfg.storage_chat_id,
        "file relay bot starting"
    );

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        relay: Arc::new(TelegramRelay::new(bot.clone(), cfg.storage_chat_id)),
        links: DeepLinks::new(me.username()),
        audit: Arc::new(AuditLogger::new(
            cfg.audit_log_path.clone(),
            cfg.audit_log_json,
        )),
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![state])
        .build();

    match cfg.public_url.as_deref() {
        Some(public_url) => {
            let url = url::Url::parse(public_url)
                .map_err(|e| anyhow::anyhow!("PUBLIC_URL is not a valid URL: {e}"))?;
            let addr = SocketAddr::from(([0, 0, 0, 0], cfg.webhook_port));
            info!(%url, %addr, "webhook delivery");

            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url)).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("update listener error"),
                )
                .await;
        }
        None => {
            // A webhook left over from a previous deployment blocks polling.
            let _ = bot.delete_webhook().await;
            info!("long polling delivery");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}
