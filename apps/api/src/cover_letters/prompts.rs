// LLM prompt constants for cover letter generation.

/// Cover letter prompt template. Placeholders: `{job_title}`,
/// `{company_name}`, `{job_description}`, `{name}`, `{industry}`,
/// `{experience_clause}`, `{skills}`, `{bio}`. The reply is markdown text,
/// not JSON.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Name: {name}
- Industry: {industry}{experience_clause}
- Skills: {skills}
- Professional Background: {bio}

Job Description:
{job_description}

Requirements:
1. Use a professional, enthusiastic tone
2. Highlight relevant skills and experience
3. Show understanding of the company's needs
4. Keep it concise (max 400 words)
5. Use proper business letter formatting in markdown
6. Include specific examples of achievements
7. Relate candidate's background to job requirements

Format the letter in markdown."#;

/// Inputs assembled from the user row and the generation request.
pub struct CoverLetterContext<'a> {
    pub job_title: &'a str,
    pub company_name: &'a str,
    pub job_description: Option<&'a str>,
    pub name: Option<&'a str>,
    pub industry: &'a str,
    pub experience_years: Option<i32>,
    pub skills: &'a [String],
    pub bio: Option<&'a str>,
}

/// Builds the cover letter prompt from the candidate's profile and the
/// target role.
pub fn cover_letter_prompt(ctx: &CoverLetterContext<'_>) -> String {
    let experience_clause = match ctx.experience_years {
        Some(years) => format!("\n- Years of Experience: {years}"),
        None => String::new(),
    };
    let skills = if ctx.skills.is_empty() {
        "not specified".to_string()
    } else {
        ctx.skills.join(", ")
    };

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", ctx.job_title)
        .replace("{company_name}", ctx.company_name)
        .replace("{job_description}", ctx.job_description.unwrap_or("not provided"))
        .replace("{name}", ctx.name.unwrap_or("not specified"))
        .replace("{industry}", ctx.industry)
        .replace("{experience_clause}", &experience_clause)
        .replace("{skills}", &skills)
        .replace("{bio}", ctx.bio.unwrap_or("not specified"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context<'a>(skills: &'a [String]) -> CoverLetterContext<'a> {
        CoverLetterContext {
            job_title: "Staff Engineer",
            company_name: "Acme",
            job_description: Some("Build reliable systems."),
            name: Some("Sam"),
            industry: "tech-software-development",
            experience_years: Some(8),
            skills,
            bio: Some("Backend engineer."),
        }
    }

    #[test]
    fn test_cover_letter_prompt_substitutes_all_placeholders() {
        let skills = vec!["Rust".to_string(), "SQL".to_string()];
        let prompt = cover_letter_prompt(&sample_context(&skills));
        assert!(prompt.contains("Staff Engineer position at Acme"));
        assert!(prompt.contains("Years of Experience: 8"));
        assert!(prompt.contains("Rust, SQL"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_cover_letter_prompt_handles_sparse_profile() {
        let skills: Vec<String> = vec![];
        let mut ctx = sample_context(&skills);
        ctx.name = None;
        ctx.bio = None;
        ctx.experience_years = None;
        ctx.job_description = None;

        let prompt = cover_letter_prompt(&ctx);
        assert!(prompt.contains("Name: not specified"));
        assert!(prompt.contains("Skills: not specified"));
        assert!(!prompt.contains("Years of Experience"));
        assert!(prompt.contains("not provided"));
    }
}
