// LLM prompt constants for insight generation.

/// System-style preamble merged into the insight prompt — enforces
/// JSON-only output with the exact key set we deserialize.
pub const INSIGHT_SYSTEM: &str = "You are an experienced labor-market analyst. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Insight prompt template. Replace `{industry}` before sending.
pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{
  "salaryRanges": [
    { "role": "string", "min": number, "max": number, "median": number }
  ],
  "growthRate": number,
  "demandLevel": "HIGH" | "MEDIUM" | "LOW",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

Include at least 5 common roles for salary ranges.
Growth rate should be a percentage.
Include at least 5 skills and trends."#;

/// Builds the full insight prompt for one industry.
pub fn insight_prompt(industry: &str) -> String {
    let body = INSIGHT_PROMPT_TEMPLATE.replace("{industry}", industry);
    format!(
        "{INSIGHT_SYSTEM}\n\n{body}\n\n{}",
        crate::llm_client::prompts::JSON_ONLY_INSTRUCTION
    )
}
