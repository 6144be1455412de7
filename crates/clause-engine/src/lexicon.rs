//! Closed-class word lists and lemma tables for the rule-based analyzer
//!
//! Coverage is tuned for contract English: modal-heavy obligations,
//! prepositional qualifiers and a vocabulary of common legal verbs.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref DETERMINERS: HashSet<&'static str> = [
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "any",
        "all", "no", "such", "either", "neither", "some", "its", "their", "his", "her",
        "our", "your", "my", "whose", "another", "both",
    ]
    .into_iter()
    .collect();

    pub static ref PRONOUNS: HashSet<&'static str> = [
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
        "who", "whom", "which", "itself", "themselves", "himself", "herself",
        "ourselves", "yourself", "whoever", "whatever", "anyone", "everyone",
        "someone", "nothing", "anything", "everything", "something", "none",
    ]
    .into_iter()
    .collect();

    pub static ref MODALS: HashSet<&'static str> = [
        "shall", "will", "may", "must", "can", "could", "would", "should", "might",
        "ca", "wo",
    ]
    .into_iter()
    .collect();

    pub static ref ADPOSITIONS: HashSet<&'static str> = [
        "of", "in", "on", "at", "by", "for", "with", "without", "within", "to", "from",
        "under", "upon", "after", "before", "during", "between", "into", "through",
        "against", "among", "about", "over", "per", "including", "except", "beyond",
        "throughout", "towards", "toward", "via", "notwithstanding", "regarding",
        "concerning", "following", "pending", "like", "than", "onto", "above", "below",
    ]
    .into_iter()
    .collect();

    pub static ref CONJUNCTIONS: HashSet<&'static str> = [
        "and", "or", "but", "nor", "if", "unless", "whether", "because", "although",
        "though", "while", "whereas", "when", "where", "until", "once", "since", "so",
        "yet", "as",
    ]
    .into_iter()
    .collect();

    pub static ref ADVERBS: HashSet<&'static str> = [
        "also", "hereby", "herein", "hereof", "hereto", "hereunder", "thereof",
        "therein", "thereto", "thereafter", "thereunder", "forthwith", "otherwise",
        "further", "however", "then", "still", "already", "always", "soon", "only",
        "not", "never", "here", "there", "now", "again", "together", "even", "just",
        "very", "too", "well", "instead", "ever", "often", "once", "else", "thus",
        "therefore", "hence", "accordingly", "moreover", "furthermore",
    ]
    .into_iter()
    .collect();

    /// Words ending in -ly that are not adverbs
    pub static ref LY_NON_ADVERBS: HashSet<&'static str> = [
        "supply", "apply", "reply", "rely", "comply", "ally", "family", "assembly",
        "monopoly", "anomaly", "italy", "july", "fly", "belly", "bully", "multiply",
    ]
    .into_iter()
    .collect();

    pub static ref ADJECTIVES: HashSet<&'static str> = [
        "prior", "written", "late", "due", "sole", "entire", "material", "full",
        "reasonable", "applicable", "confidential", "legal", "new", "same", "other",
        "certain", "first", "last", "next", "whole", "free", "good", "bad", "fair",
        "high", "low", "minimum", "maximum", "additional", "annual", "monthly",
        "net", "gross", "direct", "indirect", "exclusive", "non-exclusive", "binding",
        "subject", "liable", "responsible", "unpaid", "outstanding", "overdue",
        "necessary", "such", "mutual", "joint", "several", "own", "best", "fiscal",
        "commercial", "financial", "general", "specific", "personal", "public",
        "private", "third", "second", "early", "final", "current", "future", "past",
        "consequential", "incidental", "special", "punitive", "willful", "gross",
    ]
    .into_iter()
    .collect();

    /// Suffixes that mark an adjective when the word is otherwise unknown
    pub static ref ADJECTIVE_SUFFIXES: Vec<&'static str> = vec![
        "able", "ible", "ous", "ful", "ive", "less", "ical", "ial", "ant",
    ];

    /// Nouns caught by an adjective suffix
    pub static ref SUFFIX_NOUNS: HashSet<&'static str> = [
        "table", "cable", "bible", "representative", "objective", "executive",
        "incentive", "alternative", "initiative", "directive", "derivative",
        "tenant", "applicant", "consultant", "accountant", "warrant", "covenant",
        "grant", "merchant", "servant", "participant", "defendant", "claimant",
        "assistant", "restaurant", "remnant", "official", "credential", "potential",
        "receivable", "payable", "deliverable", "variable",
    ]
    .into_iter()
    .collect();

    pub static ref NUMBER_WORDS: HashSet<&'static str> = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirty", "sixty", "ninety", "hundred", "thousand",
        "million", "billion",
    ]
    .into_iter()
    .collect();

    /// Base forms of verbs common in agreements
    pub static ref VERBS: HashSet<&'static str> = [
        "terminate", "pay", "provide", "deliver", "indemnify", "agree", "notify",
        "comply", "assign", "waive", "retain", "disclose", "perform", "acknowledge",
        "warrant", "represent", "accept", "return", "keep", "hold", "maintain", "use",
        "sell", "transfer", "receive", "give", "make", "take", "fail", "cure", "renew",
        "govern", "include", "exclude", "limit", "apply", "survive", "remain",
        "constitute", "become", "incur", "reimburse", "charge", "owe", "approve",
        "require", "permit", "allow", "protect", "defend", "release", "bind",
        "execute", "sign", "commence", "expire", "extend", "cancel", "suspend",
        "enforce", "invoice", "calculate", "accrue", "default", "violate", "infringe",
        "compete", "solicit", "sue", "arbitrate", "settle", "resolve", "notice",
        "breach", "damage", "claim", "request", "report", "cost", "change", "control",
        "lease", "rent", "license", "offer", "order", "purchase", "supply", "deposit",
        "dispute", "audit", "review", "need", "account", "process", "record",
        "support", "work", "access", "pursue", "seek", "obtain", "ensure", "insure",
        "remove", "replace", "repair", "inspect", "occupy", "vacate", "sublet",
        "terminate", "withhold", "deduct", "refund", "forfeit", "demand", "commit",
        "prohibit", "restrict", "prevent", "cause", "arise", "occur", "exceed",
        "exist", "continue", "begin", "end", "stop", "start", "decide", "determine",
        "consent", "object", "elect", "choose", "reserve", "own", "grant", "reject",
        "refuse", "deny", "delay", "submit", "file", "appoint", "authorize", "amend",
        "modify", "revise", "update", "inform", "contact", "send", "mail", "post",
        "bring", "keep", "leave", "meet", "spend", "find", "get", "let", "set", "put",
        "run", "see", "know", "think", "say", "tell", "ask", "try", "seem", "feel",
        "help", "show", "mean", "call", "move", "live", "believe", "happen",
        "understand", "lose", "win", "buy", "build", "lend", "borrow", "sell",
        "establish", "operate", "manage", "employ", "hire", "fire", "train", "treat",
        "store", "destroy", "erase", "delete", "encrypt", "collect", "share", "sell",
        "discharge", "relieve", "cover", "compensate", "negotiate", "mediate",
    ]
    .into_iter()
    .collect();

    /// Verb forms that double as common nouns; read as verbs only in
    /// verbal context
    pub static ref NOUN_VERB_AMBIGUOUS: HashSet<&'static str> = [
        "notice", "breach", "use", "charge", "default", "transfer", "release",
        "return", "cure", "damage", "limit", "report", "request", "claim", "cost",
        "pay", "change", "control", "lease", "rent", "license", "offer", "order",
        "purchase", "supply", "deposit", "dispute", "audit", "review", "need",
        "account", "process", "record", "support", "work", "access", "demand",
        "refund", "file", "post", "mail", "end", "start", "delay", "object",
        "grant", "consent", "record", "treat", "cover", "set", "run", "call",
        "move", "show", "help", "store", "share", "hold", "sign", "order",
    ]
    .into_iter()
    .collect();

    /// Irregular inflections mapped to their lemma
    pub static ref IRREGULAR_FORMS: HashMap<&'static str, &'static str> = [
        ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("am", "be"),
        ("been", "be"), ("being", "be"), ("be", "be"),
        ("has", "have"), ("had", "have"), ("having", "have"), ("have", "have"),
        ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"), ("do", "do"),
        ("paid", "pay"), ("made", "make"), ("gave", "give"), ("given", "give"),
        ("took", "take"), ("taken", "take"), ("held", "hold"), ("kept", "keep"),
        ("sold", "sell"), ("bound", "bind"), ("became", "become"), ("brought", "bring"),
        ("sent", "send"), ("spent", "spend"), ("met", "meet"), ("left", "leave"),
        ("found", "find"), ("got", "get"), ("gotten", "get"), ("said", "say"),
        ("told", "tell"), ("knew", "know"), ("known", "know"), ("thought", "think"),
        ("began", "begin"), ("begun", "begin"), ("arose", "arise"), ("arisen", "arise"),
        ("chose", "choose"), ("chosen", "choose"), ("lost", "lose"), ("won", "win"),
        ("bought", "buy"), ("built", "build"), ("lent", "lend"), ("sought", "seek"),
        ("withheld", "withhold"), ("meant", "mean"), ("ran", "run"), ("saw", "see"),
        ("seen", "see"), ("felt", "feel"), ("ca", "can"), ("wo", "will"),
        ("n't", "not"),
    ]
    .into_iter()
    .collect();

    pub static ref IRREGULAR_PLURALS: HashMap<&'static str, &'static str> = [
        ("children", "child"), ("men", "man"), ("women", "woman"),
        ("people", "person"), ("feet", "foot"), ("data", "datum"),
        ("criteria", "criterion"), ("indices", "index"), ("appendices", "appendix"),
    ]
    .into_iter()
    .collect();
}

/// Resolve an inflected verb form to a known base form
pub fn verb_base(word: &str) -> Option<String> {
    if let Some(lemma) = IRREGULAR_FORMS.get(word) {
        return Some((*lemma).to_string());
    }
    if VERBS.contains(word) {
        return Some(word.to_string());
    }
    verb_candidates(word)
        .into_iter()
        .find(|candidate| VERBS.contains(candidate.as_str()))
}

fn verb_candidates(word: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(stem) = word.strip_suffix("ies") {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("ied") {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ed") {
        candidates.push(stem.to_string());
        candidates.push(format!("{stem}e"));
        if let Some(single) = undouble(stem) {
            candidates.push(single);
        }
    }
    if let Some(stem) = word.strip_suffix('d') {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ing") {
        candidates.push(stem.to_string());
        candidates.push(format!("{stem}e"));
        if let Some(single) = undouble(stem) {
            candidates.push(single);
        }
    }

    candidates
}

/// "committ" -> "commit"
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let prev = chars.next()?;
    (last == prev && !"aeiou".contains(last)).then(|| stem[..stem.len() - last.len_utf8()].to_string())
}

/// Singular form of a (lowercased) noun
pub fn noun_singular(word: &str) -> String {
    if let Some(lemma) = IRREGULAR_PLURALS.get(word) {
        return (*lemma).to_string();
    }
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    for suffix in ["ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !["ss", "us", "is", "ous"].iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
