use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::answers::{AnswerMap, AnswerValue};
use crate::spec::form::FormSpec;
use crate::spec::question::{QuestionSpec, QuestionType};
use crate::visibility::is_visible;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub question_id: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}

/// Validates a submission. Hidden questions are skipped entirely, so a hidden
/// required question never counts as missing.
pub fn validate(spec: &FormSpec, answers: &AnswerMap) -> ValidationResult {
    let visibility = spec.visibility(answers);

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for question in &spec.questions {
        if !is_visible(&visibility, &question.id) {
            continue;
        }

        match answers.get(&question.id) {
            Some(value) if !question.kind.collects_answer() => {
                if value.is_answered() {
                    errors.push(base_error(
                        question,
                        "statement blocks do not take answers",
                        "statement_answer",
                    ));
                }
            }
            Some(value) if value.is_answered() => {
                if let Some(error) = validate_value(question, value) {
                    errors.push(error);
                }
            }
            _ => {
                if question.required && question.kind.collects_answer() {
                    missing_required.push(question.id.clone());
                }
            }
        }
    }

    let unknown_fields: Vec<String> = answers
        .keys()
        .filter(|key| spec.question(key).is_none())
        .cloned()
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn validate_value(question: &QuestionSpec, value: &AnswerValue) -> Option<ValidationError> {
    if !matches_type(question.kind, value) {
        return Some(base_error(question, "type mismatch", "type_mismatch"));
    }

    if question.kind.has_options()
        && let Some(options) = &question.options
    {
        let selected: Vec<&str> = match value {
            AnswerValue::Choices(items) => items.iter().map(String::as_str).collect(),
            AnswerValue::Text(text) => vec![text.as_str()],
            _ => Vec::new(),
        };
        let is_declared = |choice: &&str| options.iter().any(|option| option == choice);
        if !selected.iter().all(is_declared) {
            return Some(base_error(question, "invalid option", "option_mismatch"));
        }
    }

    if let AnswerValue::Text(text) = value
        && let Some((pattern, message, code)) = format_rule(question.kind)
        && !matches_pattern(pattern, text)
    {
        return Some(base_error(question, message, code));
    }

    if let AnswerValue::Contact(contact) = value
        && let Some(email) = contact.email.as_deref()
        && !email.trim().is_empty()
        && !matches_pattern(EMAIL_PATTERN, email)
    {
        return Some(base_error(question, "invalid email", "email_format"));
    }

    None
}

/// Pattern, message and code for question types with a textual format.
fn format_rule(kind: QuestionType) -> Option<(&'static str, &'static str, &'static str)> {
    match kind {
        QuestionType::Email => Some((EMAIL_PATTERN, "invalid email address", "email_format")),
        QuestionType::Url => Some((URL_PATTERN, "invalid url", "url_format")),
        QuestionType::Date => Some((DATE_PATTERN, "invalid date", "date_format")),
        _ => None,
    }
}

fn matches_type(kind: QuestionType, value: &AnswerValue) -> bool {
    match kind {
        QuestionType::Number => value.as_number().is_some(),
        QuestionType::Checkbox => matches!(value, AnswerValue::Choices(_)),
        QuestionType::FileUpload => matches!(value, AnswerValue::Files(_)),
        QuestionType::ContactInfo => matches!(value, AnswerValue::Contact(_)),
        QuestionType::Statement => false,
        QuestionType::Text
        | QuestionType::LongText
        | QuestionType::MultipleChoice
        | QuestionType::SingleSelect
        | QuestionType::Date
        | QuestionType::Email
        | QuestionType::Url
        | QuestionType::Signature => matches!(value, AnswerValue::Text(_)),
    }
}

fn matches_pattern(pattern: &str, text: &str) -> bool {
    Regex::new(pattern)
        .map(|regex| regex.is_match(text.trim()))
        .unwrap_or(true)
}

fn base_error(question: &QuestionSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        question_id: question.id.clone(),
        message: message.into(),
        code: code.into(),
    }
}
