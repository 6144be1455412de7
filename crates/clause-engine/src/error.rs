use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Keyword must be at least 3 characters, got {0:?}")]
    KeywordTooShort(String),

    #[error("No document has been uploaded for this session")]
    NoDocument,

    #[error("Unknown match policy: {0}")]
    UnknownPolicy(String),
}
