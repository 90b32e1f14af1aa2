use thiserror::Error;

/// Failure of a single poll cycle. The display text is what the chat sees
/// and is also the value compared when suppressing repeated failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// The remote request did not produce a usable payload.
    #[error("{0}")]
    Fetch(String),
    #[error("{0}")]
    Schema(String),
    #[error("Ключ {field} недоступен")]
    MissingField { field: String },
    #[error("Передан неизвестный статус домашней работы \"{status}\"")]
    UnknownStatus { status: String },
}

impl CycleError {
    pub(crate) fn missing_field(field: &str) -> Self {
        CycleError::MissingField {
            field: field.to_string(),
        }
    }
}
