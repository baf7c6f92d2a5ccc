//! Conversation engine — the intake state machine.
//!
//! Flow: greeting (name) → collecting_info (email … tech_stack) →
//!       technical_questions (free-form answer) → completed.
//!
//! Phrasing comes from a `TextGenerator`; a failed generation is replaced by a
//! fixed diagnostic and never rolls back a state change already made.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::intake::extractor::extract;
use crate::intake::models::{CandidateRecord, FieldKind, Stage, REQUIRED_FIELDS};
use crate::intake::prompts::{
    assistant_instruction, collect_field_instruction, technical_questions_instruction,
    CONTEXT_CLOSING, CONTEXT_CONTINUE, CONTEXT_TECHNICAL, GREETING_INSTRUCTION, GREETING_MESSAGE,
};
use crate::llm_client::prompts::{build_prompt, SERVICE_UNAVAILABLE};
use crate::llm_client::TextGenerator;

/// Case-insensitive substrings that end the conversation early.
const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye", "goodbye", "stop"];

/// Prefix of every generated candidate identifier.
const CANDIDATE_ID_PREFIX: &str = "TS";

/// Owns the stage, the field cursor and the candidate record for one session.
#[derive(Debug, Clone, Default)]
pub struct ConversationEngine {
    stage: Stage,
    current_field: usize,
    record: CandidateRecord,
}

impl ConversationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Index into `REQUIRED_FIELDS` of the next field to collect. Ranges over 0..=6.
    pub fn current_field(&self) -> usize {
        self.current_field
    }

    pub fn candidate_info(&self) -> &CandidateRecord {
        &self.record
    }

    /// Overall progress, 0–100, for the presentation layer.
    pub fn progress_percent(&self) -> f64 {
        match self.stage {
            Stage::Greeting => 20.0,
            Stage::CollectingInfo => {
                40.0 + (self.current_field as f64 / REQUIRED_FIELDS.len() as f64) * 40.0
            }
            Stage::TechnicalQuestions => 85.0,
            Stage::Completed => 100.0,
        }
    }

    /// Pretty-printed JSON of the record, available once the intake is complete.
    pub fn export_json(&self) -> Option<String> {
        if self.stage != Stage::Completed || !self.record.has_required_fields() {
            return None;
        }
        serde_json::to_string_pretty(&self.record).ok()
    }

    /// Opening line, requested once before the first `process_message`.
    pub async fn greet(&self, llm: &dyn TextGenerator) -> String {
        self.respond(llm, GREETING_INSTRUCTION.to_string(), None, GREETING_MESSAGE)
            .await
    }

    /// Handles one candidate message and returns the assistant's reply.
    pub async fn process_message(&mut self, user_input: &str, llm: &dyn TextGenerator) -> String {
        if is_exit_request(user_input) {
            info!(stage = self.stage.as_str(), "Candidate ended the conversation early");
            return farewell(self.record.first_name());
        }

        match self.stage {
            Stage::Greeting => {
                self.record
                    .set(FieldKind::Name, extract(user_input, FieldKind::Name));
                // `name` is already known, so collection resumes at `email`.
                self.current_field = 1;
                self.transition(Stage::CollectingInfo);
                self.ask_next_field(user_input, llm).await
            }
            Stage::CollectingInfo => self.collect_field(user_input, llm).await,
            Stage::TechnicalQuestions => self.complete(user_input, llm).await,
            Stage::Completed => {
                let instruction = assistant_instruction(self.record.first_name());
                self.respond(llm, instruction, None, user_input).await
            }
        }
    }

    async fn collect_field(&mut self, user_input: &str, llm: &dyn TextGenerator) -> String {
        if let Some(&field) = REQUIRED_FIELDS.get(self.current_field) {
            let value = extract(user_input, field);
            debug!(field = field.as_str(), "Stored extracted field");
            self.record.set(field, value);
            self.current_field += 1;
        }

        if self.current_field < REQUIRED_FIELDS.len() {
            return self.ask_next_field(user_input, llm).await;
        }

        self.transition(Stage::TechnicalQuestions);
        let summary = self.summary();
        let instruction = technical_questions_instruction(
            self.record.first_name(),
            self.record.tech_stack.as_deref().unwrap_or(""),
        );
        let questions = self
            .respond(llm, instruction, Some(CONTEXT_TECHNICAL), user_input)
            .await;
        format!("{summary}\n**Technical Assessment:**\n{questions}")
    }

    async fn complete(&mut self, user_input: &str, llm: &dyn TextGenerator) -> String {
        self.record.technical_answers = Some(user_input.to_string());
        self.transition(Stage::Completed);
        let candidate_id = self.stamp_completion(Local::now());

        let instruction = assistant_instruction(self.record.first_name());
        let conclusion = self
            .respond(llm, instruction, Some(CONTEXT_CLOSING), user_input)
            .await;

        format!(
            "**Assessment Complete!**\n{conclusion}\n**Application ID:** {candidate_id}\n**Contact Email:** {}",
            self.record.email.as_deref().unwrap_or("N/A")
        )
    }

    async fn ask_next_field(&self, user_input: &str, llm: &dyn TextGenerator) -> String {
        let field = REQUIRED_FIELDS[self.current_field.min(REQUIRED_FIELDS.len() - 1)];
        let instruction = collect_field_instruction(field, self.record.first_name());
        self.respond(llm, instruction, Some(CONTEXT_CONTINUE), user_input)
            .await
    }

    /// Assigns `candidate_id` and `timestamp` from `now` and returns the id.
    fn stamp_completion(&mut self, now: DateTime<Local>) -> String {
        let candidate_id = candidate_id_at(&now);
        self.record.candidate_id = Some(candidate_id.clone());
        self.record.timestamp = Some(now.to_rfc3339());
        info!(candidate_id = %candidate_id, "Candidate intake completed");
        candidate_id
    }

    fn transition(&mut self, next: Stage) {
        info!(from = self.stage.as_str(), to = next.as_str(), "Stage transition");
        self.stage = next;
    }

    fn summary(&self) -> String {
        let info = &self.record;
        let first_name = info.first_name();
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());
        format!(
            "**Information Summary for {}:**\n\
             • Name: {}\n\
             • Email: {}\n\
             • Phone: {}\n\
             • Experience: {} years\n\
             • Position: {}\n\
             • Tech Stack: {}\n\
             \n\
             Great! I have all your information.",
            if first_name.is_empty() { "Candidate" } else { first_name },
            field(&info.name),
            field(&info.email),
            field(&info.phone),
            field(&info.experience),
            field(&info.position),
            field(&info.tech_stack),
        )
    }

    async fn respond(
        &self,
        llm: &dyn TextGenerator,
        instruction: String,
        context: Option<&str>,
        message: &str,
    ) -> String {
        let prompt = build_prompt(&instruction, context, message);
        match llm.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(stage = self.stage.as_str(), "Text generation failed: {e}");
                SERVICE_UNAVAILABLE.to_string()
            }
        }
    }
}

fn is_exit_request(user_input: &str) -> bool {
    let lowered = user_input.to_lowercase();
    EXIT_KEYWORDS.iter().any(|k| lowered.contains(k))
}

fn farewell(first_name: &str) -> String {
    let name = if first_name.is_empty() {
        String::new()
    } else {
        format!(", {first_name}")
    };
    format!("Thank you{name}! Our team will review your information and get back to you soon.")
}

/// `TS` followed by the HHMMSS tail of a `YYYYMMDD_HHMMSS` stamp.
fn candidate_id_at(now: &DateTime<Local>) -> String {
    let stamp = now.format("%Y%m%d_%H%M%S").to_string();
    let tail = &stamp[stamp.len() - 6..];
    format!("{CANDIDATE_ID_PREFIX}{tail}")
}
