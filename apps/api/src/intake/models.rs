use serde::{Deserialize, Serialize};

/// Discrete phase of the intake conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
    CollectingInfo,
    TechnicalQuestions,
    Completed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::CollectingInfo => "collecting_info",
            Stage::TechnicalQuestions => "technical_questions",
            Stage::Completed => "completed",
        }
    }

    /// Title-cased label for progress display, e.g. "Collecting Info".
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Greeting => "Greeting",
            Stage::CollectingInfo => "Collecting Info",
            Stage::TechnicalQuestions => "Technical Questions",
            Stage::Completed => "Completed",
        }
    }
}

/// The kind of value expected from the candidate's next message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Experience,
    Position,
    TechStack,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::Experience => "experience",
            FieldKind::Position => "position",
            FieldKind::TechStack => "tech_stack",
        }
    }
}

/// Fields collected before technical questions begin, in asking order.
pub const REQUIRED_FIELDS: [FieldKind; 6] = [
    FieldKind::Name,
    FieldKind::Email,
    FieldKind::Phone,
    FieldKind::Experience,
    FieldKind::Position,
    FieldKind::TechStack,
];

/// Everything gathered about one candidate during a session.
///
/// Field declaration order is the export key order; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_answers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CandidateRecord {
    pub fn get(&self, field: FieldKind) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: FieldKind, value: String) {
        *self.slot_mut(field) = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True once all six required fields hold a value.
    pub fn has_required_fields(&self) -> bool {
        REQUIRED_FIELDS.iter().all(|f| self.get(*f).is_some())
    }

    /// First whitespace-separated token of `name`, or "" when unknown.
    pub fn first_name(&self) -> &str {
        self.name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or("")
    }

    fn slot(&self, field: FieldKind) -> &Option<String> {
        match field {
            FieldKind::Name => &self.name,
            FieldKind::Email => &self.email,
            FieldKind::Phone => &self.phone,
            FieldKind::Experience => &self.experience,
            FieldKind::Position => &self.position,
            FieldKind::TechStack => &self.tech_stack,
        }
    }

    fn slot_mut(&mut self, field: FieldKind) -> &mut Option<String> {
        match field {
            FieldKind::Name => &mut self.name,
            FieldKind::Email => &mut self.email,
            FieldKind::Phone => &mut self.phone,
            FieldKind::Experience => &mut self.experience,
            FieldKind::Position => &mut self.position,
            FieldKind::TechStack => &mut self.tech_stack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_default_is_greeting() {
        assert_eq!(Stage::default(), Stage::Greeting);
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::TechnicalQuestions).unwrap();
        assert_eq!(json, r#""technical_questions""#);
        assert_eq!(Stage::TechnicalQuestions.as_str(), "technical_questions");
    }

    #[test]
    fn test_stage_label_is_title_case() {
        assert_eq!(Stage::CollectingInfo.label(), "Collecting Info");
        assert_eq!(Stage::Completed.label(), "Completed");
    }

    #[test]
    fn test_required_fields_order() {
        let names: Vec<_> = REQUIRED_FIELDS.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            ["name", "email", "phone", "experience", "position", "tech_stack"]
        );
    }

    #[test]
    fn test_first_name() {
        let mut record = CandidateRecord::default();
        assert_eq!(record.first_name(), "");
        record.set(FieldKind::Name, "  Jane   Doe ".to_string());
        assert_eq!(record.first_name(), "Jane");
    }

    #[test]
    fn test_first_name_blank_name() {
        let mut record = CandidateRecord::default();
        record.set(FieldKind::Name, "   ".to_string());
        assert_eq!(record.first_name(), "");
    }

    #[test]
    fn test_empty_record_serializes_to_empty_object() {
        let record = CandidateRecord::default();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }

    #[test]
    fn test_serialization_keeps_insertion_order() {
        let mut record = CandidateRecord::default();
        record.set(FieldKind::TechStack, "Rust".to_string());
        record.set(FieldKind::Name, "Jane".to_string());
        record.candidate_id = Some("TS101112".to_string());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Jane","tech_stack":"Rust","candidate_id":"TS101112"}"#
        );
    }

    #[test]
    fn test_has_required_fields() {
        let mut record = CandidateRecord::default();
        for field in REQUIRED_FIELDS {
            assert!(!record.has_required_fields());
            record.set(field, "x".to_string());
        }
        assert!(record.has_required_fields());
    }
}
