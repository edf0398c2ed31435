use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoldSipError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Upstream unavailable: {source_label} — {reason}")]
    UpstreamUnavailable { source_label: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GoldSipError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GoldSipError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GoldSipError {
    fn from(e: serde_json::Error) -> Self {
        GoldSipError::SerializationError(e.to_string())
    }
}
