use crate::domain::MessageId;

/// Core error type for the bot.
///
/// The adapter crate maps platform-specific errors into this type so the
/// transaction handlers can treat failures uniformly. Several variants
/// deliberately render to the same user-facing message; `kind()` keeps them
/// distinguishable in the diagnostic log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("malformed item identifier {0:?}")]
    BadIdentifier(String),

    #[error("stored item {0} not found or no longer available")]
    NotFound(MessageId),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("platform error: {0}")]
    Platform(String),
}

impl Error {
    /// Stable cause tag for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::BadIdentifier(_) => "bad-identifier",
            Error::NotFound(_) => "not-found",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Platform(_) => "platform",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
