use thiserror::Error;

/// Errors surfaced while handling a command.
#[derive(Debug, Error)]
pub enum BotError {
    /// Input does not match the numeric format, nothing was changed
    #[error("not a valid number: {0:?}")]
    InvalidNumber(String),

    /// A user id could not be resolved to a display name
    #[error("unknown user {0}")]
    UnknownUser(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted document exists but is not a valid ledger
    #[error("ledger data is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Startup problems, the only ones allowed to stop the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid language file: {0}")]
    Lang(#[from] serde_json::Error),

    #[error("unknown time zone {0:?}")]
    TimeZone(String),

    #[error("challenge month must be between 1 and 12, got {0}")]
    ChallengeMonth(u32),

    #[error("leaderboard limit must be between 1 and 10, got {0}")]
    LeaderboardLimit(usize),
}
