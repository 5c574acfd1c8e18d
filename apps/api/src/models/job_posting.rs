use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::job::JobDetails;
use crate::generation::script::ScriptResult;
use crate::store::{Collection, Record};

pub const DEFAULT_CREATED_BY: &str = "admin";

/// A generated job posting. Immutable once created; there is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
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
    /// Present only when a promo script was generated alongside the posting.
    pub script: Option<String>,
    pub visual_hook: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl JobPosting {
    /// Stamps normalized details with a fresh id and creation time.
    pub fn new(details: JobDetails, script: Option<ScriptResult>) -> Self {
        let JobDetails {
            job_title,
            company,
            job_description,
            key_responsibilities,
            required_skills,
            nice_to_have,
            why_join_us,
            salary_range,
            location,
            job_type,
        } = details;

        let (script, visual_hook) = match script {
            Some(s) => (Some(s.script), Some(s.visual_hook)),
            None => (None, None),
        };

        Self {
            id: Uuid::new_v4(),
            job_title,
            company,
            job_description,
            key_responsibilities,
            required_skills,
            nice_to_have,
            why_join_us,
            salary_range,
            location,
            job_type,
            script,
            visual_hook,
            created_at: Utc::now(),
            created_by: DEFAULT_CREATED_BY.to_string(),
        }
    }
}

impl Record for JobPosting {
    const COLLECTION: Collection = Collection::JobPostings;

    fn record_id(&self) -> String {
        self.id.to_string()
    }
}
