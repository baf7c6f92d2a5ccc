// Candidate intake: a scripted chat that collects contact details, asks
// technical questions tailored to the declared stack and exports the record.
// All LLM calls go through llm_client::TextGenerator.

pub mod engine;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
