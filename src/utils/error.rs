use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
