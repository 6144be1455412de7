use clause_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Missing credential: set {0} to use remote analysis")]
    MissingCredential(String),

    #[error("Remote request failed: {0}")]
    Transport(String),

    #[error("Remote service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    Decode(String),

    #[error("Clause too short: {chars} characters (need more than {min})")]
    ClauseTooShort { chars: usize, min: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
