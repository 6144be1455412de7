//! Linguistic analysis contract and the built-in rule-based analyzer
//!
//! The rest of the engine only consumes [`Sentence`]s and [`Token`]s, so
//! any external parser can be plugged in behind [`LinguisticAnalyzer`].
//! [`RuleBasedAnalyzer`] tags tokens from closed-class word lists and
//! suffix rules, then assigns dependency roles with a shallow
//! chunk-and-attach pass around the main verb.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{DepRole, PartOfSpeech, Sentence, Token};

use crate::lexicon::{
    self, ADJECTIVES, ADJECTIVE_SUFFIXES, ADPOSITIONS, ADVERBS, CONJUNCTIONS, DETERMINERS,
    IRREGULAR_FORMS, LY_NON_ADVERBS, MODALS, NOUN_VERB_AMBIGUOUS, NUMBER_WORDS, PRONOUNS,
    SUFFIX_NOUNS,
};
use crate::segment;

lazy_static! {
    static ref TOKEN_PATTERN: Regex =
        Regex::new(r"\d+(?:[.,]\d+)+|\w+(?:[-'’/]\w+)*|[^\w\s]").unwrap();
}

/// Produces sentence boundaries, lemmas, part-of-speech tags and
/// dependency roles for a text
pub trait LinguisticAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<Sentence>;

    /// Lowercased lemma of the first token of `word`
    fn lemma(&self, word: &str) -> String {
        self.analyze(word)
            .into_iter()
            .flat_map(|sentence| sentence.tokens)
            .next()
            .map(|token| token.lemma.to_lowercase())
            .unwrap_or_else(|| word.trim().to_lowercase())
    }
}

/// Dependency-free analyzer for contract English
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze one sentence-sized span
    pub fn analyze_sentence(&self, text: &str) -> Sentence {
        let words = tokenize(text);
        let mut tokens = tag(&words);
        assign_roles(&mut tokens);
        Sentence::new(text, tokens)
    }
}

impl LinguisticAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Sentence> {
        // Line breaks end a sentence as well as terminal punctuation
        text.split('\n')
            .flat_map(segment::split_sentences)
            .map(|span| span.trim().to_string())
            .filter(|span| !span.is_empty())
            .map(|span| self.analyze_sentence(&span))
            .collect()
    }
}

/// Split into word, number and punctuation tokens, detaching clitics
fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for m in TOKEN_PATTERN.find_iter(text) {
        match split_clitic(m.as_str()) {
            Some((stem, clitic)) => {
                words.push(stem.to_string());
                words.push(clitic.to_string());
            }
            None => words.push(m.as_str().to_string()),
        }
    }
    words
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    // "cannot" is "can" + "not"
    if word.eq_ignore_ascii_case("cannot") {
        return Some(word.split_at(3));
    }
    ["n't", "N'T", "'s", "'S", "’s", "’S"]
        .into_iter()
        .find(|clitic| word.len() > clitic.len() && word.ends_with(clitic))
        .map(|clitic| word.split_at(word.len() - clitic.len()))
}

fn tag(words: &[String]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(words.len());
    let mut verb_seen = false;

    for (index, word) in words.iter().enumerate() {
        let prev = tokens.last().map(|t| t.pos);
        let pos = part_of_speech(word, index == 0, prev, verb_seen);
        verb_seen |= pos == PartOfSpeech::Verb;
        let lemma = lemmatize(word, pos);
        tokens.push(Token::new(word.as_str(), lemma, pos));
    }

    // Infinitival "to" is a particle
    for i in 0..tokens.len().saturating_sub(1) {
        if tokens[i].text.eq_ignore_ascii_case("to") && tokens[i + 1].pos == PartOfSpeech::Verb {
            tokens[i].pos = PartOfSpeech::Particle;
        }
    }

    tokens
}

fn part_of_speech(
    word: &str,
    sentence_start: bool,
    prev: Option<PartOfSpeech>,
    verb_seen: bool,
) -> PartOfSpeech {
    use PartOfSpeech::*;

    let lower = word.to_lowercase();
    let w = lower.as_str();

    if !word.chars().any(char::is_alphanumeric) {
        return Punctuation;
    }
    if w.starts_with(|c: char| c.is_ascii_digit()) || NUMBER_WORDS.contains(w) {
        return Numeral;
    }
    match w {
        "not" | "n't" => return Particle,
        "'s" | "’s" => return Particle,
        "never" => return Adverb,
        _ => {}
    }
    if DETERMINERS.contains(w) {
        return Determiner;
    }
    if PRONOUNS.contains(w) {
        return Pronoun;
    }
    if MODALS.contains(w) {
        return Auxiliary;
    }
    if IRREGULAR_FORMS.get(w).is_some_and(|l| matches!(*l, "be" | "have" | "do")) {
        return Auxiliary;
    }
    if ADPOSITIONS.contains(w) {
        return Adposition;
    }
    if CONJUNCTIONS.contains(w) {
        return Conjunction;
    }
    if ADVERBS.contains(w) || (w.ends_with("ly") && w.len() > 4 && !LY_NON_ADVERBS.contains(w)) {
        return Adverb;
    }
    if ADJECTIVES.contains(w) {
        return Adjective;
    }

    if let Some(base) = lexicon::verb_base(w) {
        let inflected = base != w;
        let verbal_context = matches!(prev, Some(Auxiliary | Particle | Pronoun | Adverb));
        let nominal_context = matches!(prev, Some(Determiner | Adjective | Adposition | Numeral));

        if nominal_context {
            return if (w.ends_with("ed") || w.ends_with("ing")) && prev == Some(Determiner) {
                Adjective
            } else {
                Noun
            };
        }
        if !NOUN_VERB_AMBIGUOUS.contains(base.as_str()) {
            return Verb;
        }
        let subject_before = matches!(prev, Some(Noun | ProperNoun)) && !verb_seen && inflected;
        if verbal_context || subject_before || (sentence_start && !inflected) {
            return Verb;
        }
        return Noun;
    }

    let adjective_suffix = ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| w.ends_with(s) && w.len() > s.len() + 2);
    if adjective_suffix && !SUFFIX_NOUNS.contains(w) {
        return Adjective;
    }
    if !sentence_start && word.starts_with(char::is_uppercase) {
        return ProperNoun;
    }
    Noun
}

fn lemmatize(word: &str, pos: PartOfSpeech) -> String {
    use PartOfSpeech::*;

    let lower = word.to_lowercase();
    match pos {
        Punctuation | Numeral => word.to_string(),
        ProperNoun => word.to_string(),
        Pronoun if word == "I" => word.to_string(),
        Verb | Auxiliary => lexicon::verb_base(&lower).unwrap_or(lower),
        Noun => lexicon::noun_singular(&lower),
        Particle => IRREGULAR_FORMS
            .get(lower.as_str())
            .map(|l| (*l).to_string())
            .unwrap_or(lower),
        _ => lower,
    }
}

fn is_nominal(pos: PartOfSpeech) -> bool {
    matches!(
        pos,
        PartOfSpeech::Determiner
            | PartOfSpeech::Adjective
            | PartOfSpeech::Numeral
            | PartOfSpeech::Noun
            | PartOfSpeech::ProperNoun
            | PartOfSpeech::Pronoun
    )
}

fn is_nominal_head(pos: PartOfSpeech) -> bool {
    matches!(
        pos,
        PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Pronoun
    )
}

fn find_root(tokens: &[Token]) -> Option<usize> {
    let position = |pred: fn(&Token) -> bool| tokens.iter().position(pred);

    position(|t| t.pos == PartOfSpeech::Verb)
        .or_else(|| {
            position(|t| t.pos == PartOfSpeech::Auxiliary && !MODALS.contains(t.lemma.as_str()))
        })
        .or_else(|| position(|t| t.pos == PartOfSpeech::Auxiliary))
        .or_else(|| position(|t| is_nominal_head(t.pos)))
        .or_else(|| position(|t| !t.is_punctuation()))
}

fn assign_roles(tokens: &mut [Token]) {
    let Some(root) = find_root(tokens) else {
        for token in tokens.iter_mut() {
            token.role = DepRole::Punctuation;
        }
        return;
    };
    tokens[root].role = DepRole::Root;
    tokens[root].head_role = DepRole::Root;

    let mut subject_found = false;
    let mut object_found = false;
    let mut i = 0;

    while i < tokens.len() {
        if i == root {
            i += 1;
            continue;
        }

        if is_nominal(tokens[i].pos) {
            let mut end = i;
            while end < tokens.len() && end != root && is_nominal(tokens[end].pos) {
                end += 1;
            }
            let head = (i..end)
                .rev()
                .find(|&k| is_nominal_head(tokens[k].pos))
                .or_else(|| (i..end).rev().find(|&k| tokens[k].pos == PartOfSpeech::Numeral));

            let after_preposition = i > 0 && tokens[i - 1].pos == PartOfSpeech::Adposition;
            let governed_by_root = i > root
                && tokens[root + 1..i]
                    .iter()
                    .all(|t| matches!(t.pos, PartOfSpeech::Adverb | PartOfSpeech::Particle));

            let head_role = if after_preposition {
                DepRole::PrepositionalObject
            } else if i < root && !subject_found {
                subject_found = true;
                DepRole::NominalSubject
            } else if governed_by_root && !object_found {
                object_found = true;
                DepRole::DirectObject
            } else {
                DepRole::Other
            };

            for k in i..end {
                let token = &mut tokens[k];
                if Some(k) == head {
                    token.role = head_role;
                    token.head_role = match head_role {
                        DepRole::PrepositionalObject => DepRole::Preposition,
                        _ => DepRole::Root,
                    };
                    continue;
                }
                token.role = match token.pos {
                    PartOfSpeech::Determiner => DepRole::Determiner,
                    PartOfSpeech::Numeral => DepRole::NumericModifier,
                    PartOfSpeech::Adjective if head.is_some() => DepRole::AdjectivalModifier,
                    PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Pronoun => {
                        DepRole::Compound
                    }
                    _ => DepRole::Other,
                };
                token.head_role = head_role;
            }
            i = end;
            continue;
        }

        let prev_role = if i > 0 { tokens[i - 1].role } else { DepRole::Root };
        let prev_is_head = i > 0 && is_nominal_head(tokens[i - 1].pos);
        let token = &mut tokens[i];
        let lower = token.text.to_lowercase();

        token.role = match token.pos {
            PartOfSpeech::Particle if lower == "not" || lower == "n't" => DepRole::Negation,
            PartOfSpeech::Particle if lower == "to" => DepRole::Auxiliary,
            PartOfSpeech::Adverb if lower == "never" => DepRole::Negation,
            PartOfSpeech::Adverb => DepRole::AdverbialModifier,
            PartOfSpeech::Auxiliary => DepRole::Auxiliary,
            PartOfSpeech::Adposition => DepRole::Preposition,
            PartOfSpeech::Conjunction => DepRole::Conjunction,
            PartOfSpeech::Punctuation => DepRole::Punctuation,
            PartOfSpeech::Verb
                if prev_is_head && (lower.ends_with("ed") || lower.ends_with("ing")) =>
            {
                DepRole::ClausalModifier
            }
            _ => DepRole::Other,
        };
        token.head_role = match token.role {
            DepRole::Preposition | DepRole::ClausalModifier if prev_is_head => prev_role,
            _ => DepRole::Root,
        };
        i += 1;
    }
}
