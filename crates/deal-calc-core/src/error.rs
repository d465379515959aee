use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("{query}: no calculation has been run yet")]
    Uncalculated { query: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DealError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        DealError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if this is a validation failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            DealError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DealError {
    fn from(e: serde_json::Error) -> Self {
        DealError::SerializationError(e.to_string())
    }
}
