// Prompt templates for script and job posting generation.
// Values are embedded verbatim: callers are trusted operators, not end users.

use crate::llm_client::prompts::JSON_OBJECT_INSTRUCTION;

/// Video script prompt template.
/// Replace: {product_name}, {target_audience}, {tone}, {json_instruction}
pub const SCRIPT_PROMPT_TEMPLATE: &str = r#"Create a 30-second video script for marketing "{product_name}" to {target_audience}.

Tone: {tone}
Product: {product_name}
Target Audience: {target_audience}

Structure:
- Hook (grab attention in 2-3 seconds)
- Body (deliver message in 15-20 seconds)
- CTA (call to action in 5-7 seconds)

Return JSON with: script, visual_hook, hook, body, cta, estimated_duration

{json_instruction}"#;

/// Job posting prompt template.
/// Replace: {job_title}, {company}, {target_profile}, {tone}, {json_instruction}
pub const JOB_PROMPT_TEMPLATE: &str = r#"Create a job posting for:

Job Title: {job_title}
Company: {company}
Ideal Candidate: {target_profile}
Tone: {tone}

Return JSON with: job_title, company, job_description, key_responsibilities (list), required_skills (list), nice_to_have (list), why_join_us, salary_range, location, job_type

{json_instruction}"#;

pub fn build_script_prompt(product_name: &str, target_audience: &str, tone: &str) -> String {
    SCRIPT_PROMPT_TEMPLATE
        .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
        .replace("{product_name}", product_name)
        .replace("{target_audience}", target_audience)
        .replace("{tone}", tone)
}

pub fn build_job_prompt(
    job_title: &str,
    company: &str,
    target_profile: &str,
    tone: &str,
) -> String {
    JOB_PROMPT_TEMPLATE
        .replace("{json_instruction}", JSON_OBJECT_INSTRUCTION)
        .replace("{job_title}", job_title)
        .replace("{company}", company)
        .replace("{target_profile}", target_profile)
        .replace("{tone}", tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_prompt_embeds_all_inputs() {
        let prompt = build_script_prompt("Glow Serum", "busy parents", "Playful");
        assert!(prompt.contains(r#"marketing "Glow Serum" to busy parents"#));
        assert!(prompt.contains("Tone: Playful"));
        assert!(prompt.contains("Target Audience: busy parents"));
        assert!(prompt.contains("script, visual_hook, hook, body, cta, estimated_duration"));
        assert!(!prompt.contains('{'), "no unfilled placeholders: {prompt}");
    }

    #[test]
    fn test_job_prompt_embeds_all_inputs() {
        let prompt = build_job_prompt("UGC Creator", "Acme", "Gen-Z storyteller", "Casual");
        assert!(prompt.contains("Job Title: UGC Creator"));
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Ideal Candidate: Gen-Z storyteller"));
        assert!(prompt.contains("Tone: Casual"));
        assert!(prompt.contains("key_responsibilities (list)"));
        assert!(prompt.contains(JSON_OBJECT_INSTRUCTION));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(
            build_job_prompt("a", "b", "c", "d"),
            build_job_prompt("a", "b", "c", "d")
        );
    }

    #[test]
    fn test_values_are_embedded_verbatim() {
        let prompt = build_script_prompt("Say \"hi\"", "devs\nand ops", "Dry");
        assert!(prompt.contains("Product: Say \"hi\""));
        assert!(prompt.contains("devs\nand ops"));
    }
}
