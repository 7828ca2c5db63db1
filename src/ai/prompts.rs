/// Keys the normalizer reads from the model's JSON reply
pub const RESPONSE_KEYS: [&str; 3] = ["summary", "highlights", "glossary"];

/// Build the analysis prompt for a legal document.
///
/// The document text is embedded verbatim; nothing is truncated.
pub fn build_analysis_prompt(document_text: &str) -> String {
    format!(
        r#"Analyze the following legal document:

{}

Instructions:
- Summarize the key points of the document.
- Highlight obligations, rights, and critical clauses (as a list of objects with 'clause' and 'description').
- Provide simplified explanations of complex legal terms (as a dictionary).
Return the result as JSON with keys: 'summary', 'highlights', 'glossary'."#,
        document_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let text = "Section 1.\n  The Tenant shall {not} sublet.\n\nSection 2.";
        let prompt = build_analysis_prompt(text);
        assert!(prompt.contains(text));
    }

    #[test]
    fn test_prompt_names_every_key() {
        let prompt = build_analysis_prompt("x");
        for key in RESPONSE_KEYS {
            assert!(prompt.contains(&format!("'{}'", key)), "missing key {}", key);
        }
        assert!(prompt.contains("'clause' and 'description'"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_analysis_prompt("same"), build_analysis_prompt("same"));
    }
}
