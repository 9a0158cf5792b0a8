use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadinessError {
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot has no `kind` field")]
    MissingKind,

    #[error("Unsupported resource kind: {0}")]
    UnsupportedKind(String),
}
