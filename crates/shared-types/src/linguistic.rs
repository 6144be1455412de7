//! Token records exchanged with a linguistic analyzer
//!
//! The clause engine never inspects analyzer internals. Any analyzer
//! (the built-in rule-based one, or an adapter over an external parser)
//! produces [`Sentence`]s made of fixed-shape [`Token`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Adposition,
    Determiner,
    Conjunction,
    Particle,
    Numeral,
    Punctuation,
    Other,
}

/// Grammatical role of a token in its sentence's dependency parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepRole {
    NominalSubject,
    Root,
    DirectObject,
    PrepositionalObject,
    AdjectivalModifier,
    AdverbialModifier,
    Preposition,
    ClausalModifier,
    Negation,
    Auxiliary,
    Determiner,
    Compound,
    NumericModifier,
    Conjunction,
    Punctuation,
    Other,
}

impl DepRole {
    pub fn label(&self) -> &'static str {
        match self {
            DepRole::NominalSubject => "nsubj",
            DepRole::Root => "ROOT",
            DepRole::DirectObject => "dobj",
            DepRole::PrepositionalObject => "pobj",
            DepRole::AdjectivalModifier => "amod",
            DepRole::AdverbialModifier => "advmod",
            DepRole::Preposition => "prep",
            DepRole::ClausalModifier => "acl",
            DepRole::Negation => "neg",
            DepRole::Auxiliary => "aux",
            DepRole::Determiner => "det",
            DepRole::Compound => "compound",
            DepRole::NumericModifier => "nummod",
            DepRole::Conjunction => "cc",
            DepRole::Punctuation => "punct",
            DepRole::Other => "dep",
        }
    }
}

impl fmt::Display for DepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub role: DepRole,
    pub head_role: DepRole, // Role of this token's syntactic head
}

impl Token {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            role: DepRole::Other,
            head_role: DepRole::Root,
        }
    }

    pub fn with_role(mut self, role: DepRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_head_role(mut self, head_role: DepRole) -> Self {
        self.head_role = head_role;
        self
    }

    pub fn is_punctuation(&self) -> bool {
        self.pos == PartOfSpeech::Punctuation
    }
}

/// A sentence-level unit and its analyzed tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    pub fn root(&self) -> Option<&Token> {
        self.tokens.iter().find(|t| t.role == DepRole::Root)
    }

    pub fn has_verb(&self) -> bool {
        self.tokens.iter().any(|t| t.pos == PartOfSpeech::Verb)
    }
}
