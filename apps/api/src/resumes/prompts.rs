// LLM prompt constants for the resume module.

/// Section-improvement prompt template. Replace `{section}`, `{industry}`,
/// and `{current}` before sending. The reply is plain improved text, not
/// JSON.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"As an expert resume writer, improve the following {section} description for a {industry} professional.
Make it more impactful, quantifiable, and aligned with industry standards.

Current content: "{current}"

Requirements:
1. Use action verbs
2. Include metrics and results where possible
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords

Format the response as a single paragraph without any additional text or explanations."#;

/// Builds the improvement prompt for one resume section.
pub fn improve_prompt(section: &str, industry: &str, current: &str) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{section}", section)
        .replace("{industry}", industry)
        .replace("{current}", current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improve_prompt_substitutes_all_placeholders() {
        let prompt = improve_prompt("experience", "finance", "Managed a team.");
        assert!(prompt.contains("experience description for a finance professional"));
        assert!(prompt.contains("\"Managed a team.\""));
        assert!(!prompt.contains('{'));
    }
}
