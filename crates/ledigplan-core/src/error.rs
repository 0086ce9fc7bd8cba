use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid date '{input}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
}
