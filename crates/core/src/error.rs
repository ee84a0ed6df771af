#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed episode payload: {0}")]
    Json(#[from] serde_json::Error),
}
