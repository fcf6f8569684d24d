//! Operator liveness check (/stats).

use tracing::info;

use crate::{
    config::Config,
    formatting::escape_html,
    relay::{
        port::RelayPort,
        types::{StatsOutcome, StatsRequest},
    },
};

pub async fn handle_stats(
    cfg: &Config,
    port: &dyn RelayPort,
    req: StatsRequest,
) -> StatsOutcome {
    if req.user_id.0 != cfg.operator_id {
        info!(user = req.user_id.0, "stats rejected: not the operator");
        let _ = port.send_html(req.chat_id, "Unauthorized.").await;
        return StatsOutcome::Rejected;
    }

    let ack = format!(
        "Hello {}, your bot is running smoothly!",
        escape_html(&req.first_name)
    );
    let _ = port.send_html(req.chat_id, &ack).await;
    StatsOutcome::Acknowledged
}
