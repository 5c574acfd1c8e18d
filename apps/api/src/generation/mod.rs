// Script and job posting generation.
// All LLM calls go through llm_client; output is always run through the normalizer.

pub mod handlers;
pub mod job;
pub mod normalizer;
pub mod prompts;
pub mod script;
