//! Operator-facing audit stream.
//!
//! Every transaction outcome is appended to a local file, as JSON lines or a
//! readable plain-text block. This is diagnostics only; nothing here is ever
//! surfaced to end users.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::Serialize;

use crate::{errors::Error, Result};

const AUDIT_MAX_TEXT: usize = 500;

/// RFC3339 timestamp in UTC.
pub fn iso_timestamp_utc() -> String {
    Utc::now().to_rfc3339()
}

#[derive(Clone, Debug, Serialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEvent {
    fn base(event: &str) -> Self {
        Self {
            timestamp: iso_timestamp_utc(),
            event: event.to_string(),
            user_id: None,
            chat_id: None,
            item_id: None,
            authorized: None,
            cause: None,
            detail: None,
        }
    }

    pub fn upload_relayed(user_id: i64, item_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
            item_id: Some(item_id),
            ..Self::base("upload_relayed")
        }
    }

    /// Recorded when an upload is silently dropped; the sender sees nothing.
    pub fn upload_denied(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            authorized: Some(false),
            ..Self::base("upload_denied")
        }
    }

    pub fn upload_failed(user_id: i64, cause: &str) -> Self {
        Self {
            user_id: Some(user_id),
            cause: Some(cause.to_string()),
            ..Self::base("upload_failed")
        }
    }

    pub fn retrieve_served(chat_id: i64, item_id: i32) -> Self {
        Self {
            chat_id: Some(chat_id),
            item_id: Some(item_id),
            ..Self::base("retrieve_served")
        }
    }

    pub fn retrieve_failed(chat_id: i64, cause: &str) -> Self {
        Self {
            chat_id: Some(chat_id),
            cause: Some(cause.to_string()),
            ..Self::base("retrieve_failed")
        }
    }

    pub fn stats(user_id: i64, authorized: bool) -> Self {
        Self {
            user_id: Some(user_id),
            authorized: Some(authorized),
            ..Self::base("stats")
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuditLogger {
    path: PathBuf,
    json: bool,
}

impl AuditLogger {
    pub fn new(path: impl Into<PathBuf>, json: bool) -> Self {
        Self {
            path: path.into(),
            json,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, mut event: AuditEvent) -> Result<()> {
        if let Some(s) = &event.detail {
            event.detail = Some(truncate_text(s, AUDIT_MAX_TEXT));
        }
        if let Some(s) = &event.cause {
            event.cause = Some(truncate_text(s, AUDIT_MAX_TEXT));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if self.json {
            let line = serde_json::to_string(&event)?;
            writeln!(file, "{line}")?;
            return Ok(());
        }

        // Plain text format for readability.
        let mut out = String::new();
        out.push('\n');
        out.push_str(&"=".repeat(60));

        let value = serde_json::to_value(&event)?;
        let Some(obj) = value.as_object() else {
            return Err(Error::Platform(
                "audit event is not a JSON object".to_string(),
            ));
        };
        for (k, v) in obj {
            out.push('\n');
            out.push_str(k);
            out.push_str(": ");
            out.push_str(&json_value_to_display(v));
        }
        out.push('\n');

        file.write_all(out.as_bytes())?;
        Ok(())
    }
}

pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut out = s.chars().take(max_len).collect::<String>();
    out.push_str("...");
    out
}

fn json_value_to_display(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| "<unprintable>".to_string()),
    }
}
