//! Promo video script generation: prompt → model → normalized `ScriptResult`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generation::normalizer::{normalize, FieldSet, FieldSpec};
use crate::generation::prompts::build_script_prompt;
use crate::llm_client::{LlmError, TextGenerator};

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptRequest {
    pub product_name: String,
    pub target_audience: String,
    pub tone: String,
}

/// A short-form video script. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script: String,
    pub visual_hook: String,
    pub hook: String,
    pub body: String,
    pub cta: String,
    /// Seconds.
    pub estimated_duration: i64,
}

pub fn script_fields() -> FieldSet {
    FieldSet {
        primary: "script",
        fields: vec![
            FieldSpec::text("script", ""),
            FieldSpec::text("visual_hook", "Product showcase"),
            FieldSpec::text("hook", "Check this out!"),
            FieldSpec::text("body", ""),
            FieldSpec::text("cta", "Get it now!"),
            FieldSpec::duration("estimated_duration"),
        ],
    }
}

impl ScriptResult {
    /// Builds a script from raw model output. Never fails.
    pub fn from_model_output(raw: &str) -> Self {
        let mut fields = normalize(raw, &script_fields());
        if fields.degraded {
            warn!("Script response was not a JSON object; using raw text as the script");
        }

        Self {
            script: fields.take_text("script"),
            visual_hook: fields.take_text("visual_hook"),
            hook: fields.take_text("hook"),
            body: fields.take_text("body"),
            cta: fields.take_text("cta"),
            estimated_duration: fields.take_duration("estimated_duration"),
        }
    }
}

/// Asks the model for a script and normalizes whatever comes back.
/// Only the model call itself can fail.
pub async fn generate_script(
    llm: &dyn TextGenerator,
    request: &ScriptRequest,
) -> Result<ScriptResult, LlmError> {
    let prompt = build_script_prompt(
        &request.product_name,
        &request.target_audience,
        &request.tone,
    );
    let raw = llm.generate(&prompt).await?;
    Ok(ScriptResult::from_model_output(&raw))
}
