use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected arg: {0}")]
    UnexpectedArg(String),

    #[error("missing value for --{0}")]
    MissingValue(String),

    #[error("invalid --{key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("invalid catalog entry {scenario}: {reason}")]
    InvalidCatalog {
        scenario: &'static str,
        reason: String,
    },

    #[error("logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Usage problems exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnexpectedArg(_)
            | Error::MissingValue(_)
            | Error::InvalidValue { .. }
            | Error::UnknownScenario(_) => 2,
            _ => 1,
        }
    }
}
