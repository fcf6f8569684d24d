use std::sync::Arc;

use frb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), frb_core::Error> {
    frb_core::logging::init("frb")?;

    let cfg = Arc::new(Config::load()?);

    frb_telegram::router::run(cfg)
        .await
        .map_err(|e| frb_core::Error::Platform(format!("telegram bot failed: {e}")))?;

    Ok(())
}
