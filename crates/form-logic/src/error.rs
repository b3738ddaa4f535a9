use thiserror::Error;

/// Failures while loading form definitions or answer snapshots.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to parse form: {0}")]
    FormParse(#[source] serde_json::Error),
    #[error("failed to parse answers: {0}")]
    AnswersParse(#[source] serde_json::Error),
}
