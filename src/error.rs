use thiserror::Error;
use uuid::Uuid;

/// Rejected input from the feature normalizer or the account validators.
/// Nothing reaches the scoring service or the database on this path.
#[derive(Debug, Clone, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures talking to the external scoring service. No assessment is
/// persisted when one of these is raised.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("scoring service did not answer within {0} seconds")]
    Timeout(u64),

    #[error("scoring service returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("scoring service unreachable: {0}")]
    Network(#[source] reqwest::Error),
}

/// Failures from the persistence layer. The `UserNotFound*` variants are
/// client-input errors, not server faults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no user with id {0}")]
    UserNotFound(Uuid),

    #[error("no user registered under {0}")]
    UserNotFoundByEmail(String),

    #[error("stored assessment carries unrecognized gender `{0}`")]
    InvalidGender(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
