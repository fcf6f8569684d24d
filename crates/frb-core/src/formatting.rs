//! Formatting utilities for user-facing messages (Telegram HTML parse mode).

use crate::relay::types::{PayloadKind, StoredItem};

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Byte size in MiB, rounded to 2 decimals and rendered without a trailing
/// zero: 1,048,576 -> "1.0", 1,289,748 -> "1.23", 0 -> "0.0".
pub fn format_size_mib(bytes: u64) -> String {
    let mib = bytes as f64 / (1024.0 * 1024.0);
    let rounded = (mib * 100.0).round() / 100.0;
    let s = format!("{rounded:.2}");
    match s.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => s,
    }
}

/// Caption for a delivered item.
///
/// Documents carry name/size/type; videos get a generic label; everything
/// else (audio included) falls back to the generic file label.
pub fn retrieval_caption(item: &StoredItem) -> String {
    let mut caption = String::from("✅ Your file is ready!\n\n");
    match item.kind {
        PayloadKind::Document => {
            let name = item.file_name.as_deref().unwrap_or("(unnamed)");
            let size = format_size_mib(item.byte_size.unwrap_or(0));
            let mime = item.mime_type.as_deref().unwrap_or("unknown");
            caption.push_str(&format!(
                "📄 Name: {}\n📦 Size: {} MB\n🧾 Type: {}",
                escape_html(name),
                size,
                escape_html(mime),
            ));
        }
        PayloadKind::Video => caption.push_str("🎥 A video file has been prepared."),
        PayloadKind::Audio | PayloadKind::Other => {
            caption.push_str("📁 Your file has been prepared.")
        }
    }
    caption
}
