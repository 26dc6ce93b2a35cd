use thiserror::Error;

/// Errors from check construction, configuration and scenario evaluation.
///
/// The two core length checks never fail; these only arise from the
/// surfaces around them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("invalid length tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),

    #[error("unknown check: {0}")]
    UnknownCheck(String),

    #[error("check {0} configured more than once")]
    DuplicateCheck(String),

    #[error("check {check} requires scenario {field}, but the row has none")]
    MissingScenarioField { check: String, field: &'static str },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;

impl From<toml::de::Error> for CheckError {
    fn from(err: toml::de::Error) -> Self {
        CheckError::Config(err.to_string())
    }
}
