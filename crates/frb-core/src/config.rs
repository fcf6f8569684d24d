use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

/// Typed process-wide configuration.
///
/// Built once at startup from the environment and treated as immutable for
/// the process lifetime; handlers receive it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// Private chat every upload is relayed into. Telegram's retention of
    /// that chat is the only durable store this system has.
    pub storage_chat_id: i64,

    /// The only identity allowed to call /stats.
    pub operator_id: i64,

    /// Public HTTPS endpoint for webhook delivery; `None` selects long
    /// polling.
    pub public_url: Option<String>,
    pub webhook_port: u16,

    // Audit stream
    pub audit_log_path: PathBuf,
    pub audit_log_json: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let storage_chat_id = required_i64("STORAGE_CHAT_ID")?;
        let operator_id = required_i64("OPERATOR_ID")?;

        let public_url = env_str("PUBLIC_URL").and_then(non_empty);
        let webhook_port = env_u16("PORT").unwrap_or(8080);

        let audit_log_path = PathBuf::from(
            env_str("AUDIT_LOG_PATH").unwrap_or("/tmp/frb-audit.log".to_string()),
        );
        let audit_log_json = env_bool("AUDIT_LOG_JSON").unwrap_or(false);

        Ok(Self {
            telegram_bot_token,
            storage_chat_id,
            operator_id,
            public_url,
            webhook_port,
            audit_log_path,
            audit_log_json,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn required_i64(key: &str) -> Result<i64> {
    let raw = env_str(key)
        .and_then(non_empty)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))?;

    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::Config(format!("{key} must be a numeric Telegram id, got {raw:?}")))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u16(key: &str) -> Option<u16> {
    env_str(key).and_then(|s| s.trim().parse::<u16>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
