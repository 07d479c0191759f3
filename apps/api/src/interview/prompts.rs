// LLM prompt constants for the interview module.

/// Quiz prompt template. Replace `{industry}` and `{skills_clause}` before
/// sending. `{skills_clause}` is either empty or " with expertise in ...".
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate 10 technical interview questions for a {industry} professional{skills_clause}.

Each question should be multiple choice with 4 options.

Return the response in this JSON format only:
{
  "questions": [
    {
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string",
      "explanation": "string"
    }
  ]
}"#;

/// Improvement-tip prompt template. Replace `{industry}` and `{mistakes}`.
pub const IMPROVEMENT_TIP_PROMPT_TEMPLATE: &str = r#"The user got the following {industry} technical interview questions wrong:

{mistakes}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by the wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't explicitly mention the mistakes, instead focus on what to learn and practice."#;

/// Builds the quiz prompt for a user's industry and skill set.
pub fn quiz_prompt(industry: &str, skills: &[String]) -> String {
    let skills_clause = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };
    let body = QUIZ_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{skills_clause}", &skills_clause);
    format!(
        "{body}\n\n{}",
        crate::llm_client::prompts::JSON_ONLY_INSTRUCTION
    )
}

/// Builds the improvement-tip prompt from the user's wrong answers.
pub fn improvement_tip_prompt(industry: &str, mistakes: &str) -> String {
    IMPROVEMENT_TIP_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{mistakes}", mistakes)
}
