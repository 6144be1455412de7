//! Strict decoding of model replies
//!
//! Replies are parsed as JSON data only. Anything other than an object with
//! exactly `risk`, `simplified` and `explanation` is rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{RemoteRisk, RiskLevel};

use crate::error::RemoteError;

pub const FALLBACK_SIMPLIFIED: &str = "Could not simplify";
pub const FALLBACK_EXPLANATION: &str = "Could not explain";

/// Decoded analysis of one clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteAnalysis {
    pub risk: RemoteRisk,
    pub simplified: String,
    pub explanation: String,
}

impl RemoteAnalysis {
    /// Result reported when the remote call or decoding fails
    pub fn sentinel() -> Self {
        Self {
            risk: RemoteRisk::Unknown,
            simplified: FALLBACK_SIMPLIFIED.to_string(),
            explanation: FALLBACK_EXPLANATION.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReply {
    risk: String,
    simplified: String,
    explanation: RawExplanation,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExplanation {
    Text(String),
    Fields(Map<String, Value>),
}

impl RawExplanation {
    fn render(self) -> Result<String, RemoteError> {
        match self {
            RawExplanation::Text(text) => Ok(text),
            RawExplanation::Fields(fields) => {
                let mut parts = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    match value {
                        Value::String(text) => parts.push(format!("{}: {}", key, text)),
                        other => {
                            return Err(RemoteError::Decode(format!(
                                "explanation field {:?} is not a string: {}",
                                key, other
                            )))
                        }
                    }
                }
                Ok(parts.join(" | "))
            }
        }
    }
}

/// Remove a surrounding markdown code fence (```json ... ```), if any
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

pub fn decode_reply(reply: &str) -> Result<RemoteAnalysis, RemoteError> {
    let body = strip_code_fence(reply);
    let raw: RawReply =
        serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()))?;

    let risk: RiskLevel = raw
        .risk
        .parse()
        .map_err(|e: shared_types::ParseRiskError| RemoteError::Decode(e.to_string()))?;

    Ok(RemoteAnalysis {
        risk: risk.into(),
        simplified: raw.simplified,
        explanation: raw.explanation.render()?,
    })
}
