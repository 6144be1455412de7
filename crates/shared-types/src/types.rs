use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upload formats accepted by the extractor, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Docx,
    Txt,
    Csv,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Pdf,
        SourceFormat::Docx,
        SourceFormat::Txt,
        SourceFormat::Csv,
    ];

    /// Match a bare extension ("pdf", ".PDF") to a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            "txt" => Some(SourceFormat::Txt),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }

    /// Match the extension of an uploaded file name
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::Txt => "txt",
            SourceFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text extracted from one upload. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub format: SourceFormat,
    pub text: String,
    pub page_count: Option<u32>, // PDF only
    pub ocr_applied: bool,
    pub extracted_at: i64, // Unix seconds
}

impl Document {
    pub fn new(filename: impl Into<String>, format: SourceFormat, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            format,
            text: text.into(),
            page_count: None,
            ocr_applied: false,
            extracted_at: chrono::Utc::now().timestamp(),
        }
    }

    /// True when extraction (and OCR, if attempted) produced nothing usable
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Risk tier assigned to a clause by the local classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Capitalized form used in rendered reports ("High")
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown risk level: {0}")]
pub struct ParseRiskError(pub String);

impl FromStr for RiskLevel {
    type Err = ParseRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(ParseRiskError(s.to_string())),
        }
    }
}

/// Risk tier reported by the remote analyzer; `Unknown` marks the sentinel result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteRisk {
    Low,
    Medium,
    High,
    Unknown,
}

impl RemoteRisk {
    pub fn label(&self) -> &'static str {
        match self {
            RemoteRisk::Low => "Low",
            RemoteRisk::Medium => "Medium",
            RemoteRisk::High => "High",
            RemoteRisk::Unknown => "Unknown",
        }
    }
}

impl From<RiskLevel> for RemoteRisk {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => RemoteRisk::Low,
            RiskLevel::Medium => RemoteRisk::Medium,
            RiskLevel::High => RemoteRisk::High,
        }
    }
}

/// One matched clause from the local pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseReport {
    pub index: usize, // 1-based position in the result list
    pub original: String,
    pub risk: RiskLevel,
    pub simplified: String,
    pub explanation: Vec<String>, // One summary per sentence
}

/// One clause analyzed by the hosted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteClauseReport {
    pub index: usize,
    pub original: String,
    pub risk: RemoteRisk,
    pub simplified: String,
    pub explanation: String,
}
