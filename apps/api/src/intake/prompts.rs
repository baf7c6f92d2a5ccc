// All LLM instructions for the intake conversation.
// Prompt assembly (instruction + context + message) lives in llm_client::prompts.

use crate::intake::models::FieldKind;

/// Instruction for the opening greeting.
pub const GREETING_INSTRUCTION: &str = "You are a friendly hiring assistant for TalentScout recruitment agency. \
Hello, I am the TalentScout Hiring Assistant. I'll help you with your application today. \
I'll ask for some basic information and a few technical questions. \
Let's start by getting your full name. Keep it brief and professional.";

/// Fixed message sent with the greeting instruction.
pub const GREETING_MESSAGE: &str = "Hello";

/// Context notes passed alongside the candidate's message.
pub const CONTEXT_CONTINUE: &str = "Continue collecting information";
pub const CONTEXT_TECHNICAL: &str = "Generate technical questions";
pub const CONTEXT_CLOSING: &str = "Thank you for completing the assessment";

/// Static text shown before the first message of a session.
pub const WELCOME_MESSAGE: &str = "Hello! I'm ready to help with your job application. \
I'll collect some information about you and ask technical questions.\n\n\
Type \"Hi\" to get started!";

fn name_context(first_name: &str) -> String {
    if first_name.is_empty() {
        String::new()
    } else {
        format!(" The candidate's name is {first_name}.")
    }
}

fn addressee(first_name: &str) -> &str {
    if first_name.is_empty() {
        "them"
    } else {
        first_name
    }
}

/// Instruction asking for `field`, addressed to the candidate by first name.
pub fn collect_field_instruction(field: FieldKind, first_name: &str) -> String {
    let who = addressee(first_name);
    let ask = match field {
        FieldKind::Name => "Ask for their full name professionally".to_string(),
        FieldKind::Email => format!("Thank {who} and ask for their email address"),
        FieldKind::Phone => format!("Great! Now ask {who} for their phone number"),
        FieldKind::Experience => format!(
            "Perfect! Ask {who} how many years of experience they have in technology"
        ),
        FieldKind::Position => format!(
            "Excellent! Ask {who} what position they're interested in applying for"
        ),
        FieldKind::TechStack => format!("Wonderful! Ask {who} to list their technical skills"),
    };
    format!(
        "You are collecting candidate information for a tech recruitment process. \n\
         {ask}. \nBe friendly but brief.{}",
        name_context(first_name)
    )
}

/// Instruction asking for 3-4 questions tailored to the declared tech stack.
pub fn technical_questions_instruction(first_name: &str, tech_stack: &str) -> String {
    format!(
        "Based on {first_name}'s tech stack: \"{tech_stack}\", generate 3-4 relevant technical questions. \n\
         Make them practical interview questions. Format as a numbered list. Be encouraging.{}",
        name_context(first_name)
    )
}

/// Generic framing used once the intake is complete.
pub fn assistant_instruction(first_name: &str) -> String {
    format!(
        "You are a helpful hiring assistant. Respond appropriately and professionally.{}",
        name_context(first_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_field_uses_first_name() {
        let prompt = collect_field_instruction(FieldKind::Email, "Jane");
        assert!(prompt.contains("Thank Jane and ask for their email address"));
        assert!(prompt.ends_with("The candidate's name is Jane."));
    }

    #[test]
    fn test_collect_field_without_name_says_them() {
        let prompt = collect_field_instruction(FieldKind::Phone, "");
        assert!(prompt.contains("ask them for their phone number"));
        assert!(!prompt.contains("candidate's name"));
    }

    #[test]
    fn test_technical_instruction_embeds_stack_verbatim() {
        let prompt = technical_questions_instruction("Jane", "Python, Go");
        assert!(prompt.contains(r#"tech stack: "Python, Go""#));
        assert!(prompt.contains("3-4 relevant technical questions"));
    }

    #[test]
    fn test_assistant_instruction() {
        assert_eq!(
            assistant_instruction(""),
            "You are a helpful hiring assistant. Respond appropriately and professionally."
        );
    }
}
