// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts alongside it.

/// Appended to every generation prompt. The normalizer still copes when the model ignores it.
pub const JSON_OBJECT_INSTRUCTION: &str = "\
    Respond with a single JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";
