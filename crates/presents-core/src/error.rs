use thiserror::Error;

/// Errors raised while loading, validating or querying a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster input violates a structural invariant.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
    /// A lookup was made for someone the roster does not know.
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    /// The roster file is not valid TOML for the expected layout.
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// Convenience alias for roster results.
pub type Result<T> = std::result::Result<T, RosterError>;
