//! Risk keyword tables
//!
//! Three tiers of phrases. A token is looked up against the tiers in
//! priority order high > medium > low. Comparison is exact and case-folded,
//! so multi-word phrases are kept verbatim but never match a single token.

use std::collections::HashSet;

use shared_types::RiskLevel;

/// Phrases that signal high exposure (litigation, insolvency, IP)
pub const HIGH_RISK_KEYWORDS: &[&str] = &[
    "termination",
    "breach",
    "damages",
    "lawsuit",
    "insolvency",
    "bankruptcy",
    "regulatory violations",
    "change of control",
    "force majeure",
    "negligence",
    "wrongful acts",
    "fraud",
    "penalties",
    "liability cap breach",
    "intellectual property",
    "infringement",
    "non-compete",
    "non-solicitation",
    "governing law conflicts",
    "irrevocable license",
    "covenant not to sue",
    "waiver of rights",
    "class action waiver",
];

/// Phrases that signal obligations and dispute handling
pub const MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "indemnification",
    "limitation of liability",
    "dispute resolution",
    "confidentiality",
    "non-disclosure",
    "obligation",
    "compliance",
    "remedies",
    "arbitration",
    "mediation",
    "audit rights",
    "assignment clauses",
    "return of confidential information",
    "exceptions clauses",
    "restricted use",
    "applicable law",
    "jurisdiction",
    "third-party rights",
    "data protection",
    "GDPR compliance",
];

/// Commercial and structural terms
pub const LOW_RISK_KEYWORDS: &[&str] = &[
    "payment terms",
    "notice period",
    "duration",
    "renewal",
    "exit fees",
    "interest on late payment",
    "negotiation",
    "service level agreement",
    "effective date",
    "governing language",
    "contract structure",
    "headers/subheaders",
    "document type",
    "aliases/roles of parties",
];

/// Score added by a tier match, first matching tier only
pub fn tier_weight(tier: RiskLevel) -> u32 {
    match tier {
        RiskLevel::High => 3,
        RiskLevel::Medium => 2,
        RiskLevel::Low => 1,
    }
}

/// Read-only keyword configuration, built once and shared by reference
#[derive(Debug, Clone)]
pub struct RiskKeywordTable {
    high: HashSet<String>,
    medium: HashSet<String>,
    low: HashSet<String>,
}

impl RiskKeywordTable {
    pub fn new(high: &[&str], medium: &[&str], low: &[&str]) -> Self {
        let fold = |phrases: &[&str]| phrases.iter().map(|p| p.to_lowercase()).collect();
        Self {
            high: fold(high),
            medium: fold(medium),
            low: fold(low),
        }
    }

    /// The built-in financial/legal keyword lists
    pub fn standard() -> Self {
        Self::new(HIGH_RISK_KEYWORDS, MEDIUM_RISK_KEYWORDS, LOW_RISK_KEYWORDS)
    }

    pub fn phrases(&self, tier: RiskLevel) -> &HashSet<String> {
        match tier {
            RiskLevel::High => &self.high,
            RiskLevel::Medium => &self.medium,
            RiskLevel::Low => &self.low,
        }
    }

    /// Exact, case-folded membership of one token in one tier
    pub fn contains(&self, tier: RiskLevel, token: &str) -> bool {
        self.phrases(tier).contains(&token.to_lowercase())
    }

    /// Highest tier containing the token
    pub fn tier_of(&self, token: &str) -> Option<RiskLevel> {
        [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
            .into_iter()
            .find(|&tier| self.contains(tier, token))
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RiskKeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}
