pub mod linguistic;
pub mod session;
pub mod types;

pub use linguistic::{DepRole, PartOfSpeech, Sentence, Token};
pub use session::Session;
pub use types::{
    ClauseReport, Document, ParseRiskError, RemoteClauseReport, RemoteRisk, RiskLevel,
    SourceFormat,
};
