// Shared prompt fragments and the prompt assembly used by every LLM call.
// Stage-specific instructions live in intake/prompts.rs.

/// Returned to the candidate whenever a generation call fails for any reason.
pub const SERVICE_UNAVAILABLE: &str =
    "Sorry, I'm having trouble connecting to the AI service. Please check your API key.";

/// Assembles the single prompt string sent to the model:
/// instruction, optional context line, then the candidate's message.
pub fn build_prompt(instruction: &str, context: Option<&str>, message: &str) -> String {
    let mut prompt = instruction.to_string();
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("\nContext: ");
        prompt.push_str(context);
    }
    prompt.push_str("\nCandidate message: ");
    prompt.push_str(message);
    prompt
}
