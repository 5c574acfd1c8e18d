//! Job posting generation.
//!
//! Flow: build job prompt → model → normalize → (optional) promo script → stamp id/time →
//! persist → return.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::normalizer::{normalize, FieldSet, FieldSpec};
use crate::generation::prompts::build_job_prompt;
use crate::generation::script::{generate_script, ScriptRequest};
use crate::llm_client::TextGenerator;
use crate::models::job_posting::JobPosting;
use crate::store::{insert_record, RecordStore};

pub const DEFAULT_TONE: &str = "Professional";

#[derive(Debug, Clone, Deserialize)]
pub struct JobPostingRequest {
    pub job_title: String,
    pub company: String,
    pub target_profile: String,
    pub tone: Option<String>,
    // A promo script is generated only when all three are given.
    pub product_name: Option<String>,
    pub target_audience: Option<String>,
    pub script_tone: Option<String>,
}

impl JobPostingRequest {
    fn tone(&self) -> &str {
        non_blank(&self.tone).unwrap_or(DEFAULT_TONE)
    }

    /// The script request implied by the optional product fields, if complete.
    pub fn script_request(&self) -> Option<ScriptRequest> {
        Some(ScriptRequest {
            product_name: non_blank(&self.product_name)?.to_string(),
            target_audience: non_blank(&self.target_audience)?.to_string(),
            tone: non_blank(&self.script_tone)?.to_string(),
        })
    }
}

/// Whitespace-only values count as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Normalized job content as produced by the model, before id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDetails {
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub key_responsibilities: Vec<String>,
    pub required_skills: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub why_join_us: String,
    pub salary_range: String,
    pub location: String,
    pub job_type: String,
}

/// Job field set. Title and company default to what the caller asked for.
pub fn job_fields(job_title: &str, company: &str) -> FieldSet {
    FieldSet {
        primary: "job_description",
        fields: vec![
            FieldSpec::text("job_title", job_title),
            FieldSpec::text("company", company),
            FieldSpec::text("job_description", ""),
            FieldSpec::list("key_responsibilities"),
            FieldSpec::list("required_skills"),
            FieldSpec::list("nice_to_have"),
            FieldSpec::text("why_join_us", ""),
            FieldSpec::text("salary_range", "Competitive"),
            FieldSpec::text("location", "Remote"),
            FieldSpec::text("job_type", "Full-time"),
        ],
    }
}

impl JobDetails {
    /// Builds job details from raw model output. Never fails.
    pub fn from_model_output(raw: &str, job_title: &str, company: &str) -> Self {
        let mut fields = normalize(raw, &job_fields(job_title, company));
        if fields.degraded {
            warn!("Job response was not a JSON object; using raw text as the description");
        }

        Self {
            job_title: fields.take_text("job_title"),
            company: fields.take_text("company"),
            job_description: fields.take_text("job_description"),
            key_responsibilities: fields.take_list("key_responsibilities"),
            required_skills: fields.take_list("required_skills"),
            nice_to_have: fields.take_list("nice_to_have"),
            why_join_us: fields.take_text("why_join_us"),
            salary_range: fields.take_text("salary_range"),
            location: fields.take_text("location"),
            job_type: fields.take_text("job_type"),
        }
    }
}

/// Generates, persists and returns a job posting.
/// Model and storage failures propagate; malformed model output does not fail.
pub async fn generate_job_posting(
    llm: &dyn TextGenerator,
    store: &dyn RecordStore,
    request: &JobPostingRequest,
) -> Result<JobPosting, AppError> {
    let prompt = build_job_prompt(
        &request.job_title,
        &request.company,
        &request.target_profile,
        request.tone(),
    );
    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate job posting: {e}")))?;
    let details = JobDetails::from_model_output(&raw, &request.job_title, &request.company);

    let script = match request.script_request() {
        Some(script_request) => Some(
            generate_script(llm, &script_request)
                .await
                .map_err(|e| AppError::Llm(format!("Failed to generate job posting: {e}")))?,
        ),
        None => None,
    };

    let posting = JobPosting::new(details, script);
    insert_record(store, &posting).await?;

    info!("Job posting created: {}", posting.id);
    Ok(posting)
}
