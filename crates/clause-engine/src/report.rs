//! Markdown rendering of analysis results

use std::fmt::Write;

use shared_types::{ClauseReport, RemoteClauseReport};

pub const RESULTS_HEADING: &str = "### 🧠 Analysis Results";
pub const NO_MATCHES: &str = "No relevant clauses found for the given keyword.";

/// One block per clause, separated by horizontal rules
pub fn render_markdown(clauses: &[ClauseReport]) -> String {
    if clauses.is_empty() {
        return NO_MATCHES.to_string();
    }

    let mut out = format!("{}\n\n", RESULTS_HEADING);
    for clause in clauses {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "**Clause {}:**\n\n\
             - 🔍 **Original:** {}\n\
             - ⚠️ **Risk Level:** `{}`\n\
             - 🧾 **Simplified:** {}\n\
             - 📘 **Explanation:** {}\n\n\
             ---\n\n",
            clause.index,
            clause.original,
            clause.risk.label(),
            clause.simplified,
            clause.explanation.join("; "),
        );
    }
    out
}

pub fn render_remote_markdown(clauses: &[RemoteClauseReport]) -> String {
    if clauses.is_empty() {
        return NO_MATCHES.to_string();
    }

    let mut out = format!("{}\n\n", RESULTS_HEADING);
    for clause in clauses {
        let _ = write!(
            out,
            "**Clause {}:**\n\n\
             - 🔍 **Original:** {}\n\
             - ⚠️ **Risk Level:** `{}`\n\
             - 🧾 **Simplified:** {}\n\
             - 📘 **Explanation:** {}\n\n\
             ---\n\n",
            clause.index,
            clause.original,
            clause.risk.label(),
            clause.simplified,
            clause.explanation,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{RemoteRisk, RiskLevel};

    #[test]
    fn test_local_block_layout() {
        let clauses = vec![ClauseReport {
            index: 1,
            original: "Rent is due.".to_string(),
            risk: RiskLevel::Medium,
            simplified: "rent be due .".to_string(),
            explanation: vec!["Action: be".to_string(), "Subject: Rent".to_string()],
        }];

        assert_eq!(
            render_markdown(&clauses),
            "### 🧠 Analysis Results\n\n\
             **Clause 1:**\n\n\
             - 🔍 **Original:** Rent is due.\n\
             - ⚠️ **Risk Level:** `Medium`\n\
             - 🧾 **Simplified:** rent be due .\n\
             - 📘 **Explanation:** Action: be; Subject: Rent\n\n\
             ---\n\n"
        );
    }

    #[test]
    fn test_remote_block_shows_unknown() {
        let clauses = vec![RemoteClauseReport {
            index: 2,
            original: "Clause".to_string(),
            risk: RemoteRisk::Unknown,
            simplified: "Could not simplify".to_string(),
            explanation: "Could not explain".to_string(),
        }];
        let markdown = render_remote_markdown(&clauses);
        assert!(markdown.contains("**Clause 2:**"));
        assert!(markdown.contains("`Unknown`"));
        assert!(markdown.contains("Could not explain"));
    }

    #[test]
    fn test_no_matches_message() {
        assert_eq!(render_markdown(&[]), NO_MATCHES);
        assert_eq!(render_remote_markdown(&[]), NO_MATCHES);
    }
}
