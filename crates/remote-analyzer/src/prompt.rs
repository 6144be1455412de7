/// Instruction sent with every clause. The reply must be a bare JSON
/// object with exactly the three listed fields.
pub fn build_prompt(clause: &str) -> String {
    format!(
        r#"Analyze the following legal clause:
Clause: "{clause}"

1. Classify its risk level (high, medium, low).
2. Simplify the clause.
3. Explain the clause in terms of subject, action, object, and modifiers.

Respond with a single JSON object and nothing else:
{{
    "risk": "...",
    "simplified": "...",
    "explanation": "..."
}}"#,
        clause = clause.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_clause() {
        let prompt = build_prompt("  Tenant pays all fees.  ");
        assert!(prompt.contains("Clause: \"Tenant pays all fees.\""));
        assert!(prompt.contains("\"risk\""));
        assert!(prompt.contains("\"simplified\""));
        assert!(prompt.contains("\"explanation\""));
    }
}
