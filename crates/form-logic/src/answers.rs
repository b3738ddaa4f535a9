use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormError;

/// Answers collected so far in one session, keyed by question id.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// File stored by the upload collaborator; only the metadata reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UploadedFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Structured answer of a `contactInfo` question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ContactAnswer {
    /// Non-blank field values in declaration order.
    pub fn filled_values(&self) -> impl Iterator<Item = &str> {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.company,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|value| !value.trim().is_empty())
    }
}

/// An answer value; the shape depends on the question type that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Explicitly cleared answer, e.g. a wiped signature.
    Empty,
    Boolean(bool),
    Number(f64),
    Text(String),
    /// Selected options of a checkbox question.
    Choices(Vec<String>),
    Files(Vec<UploadedFile>),
    Contact(ContactAnswer),
}

impl AnswerValue {
    /// Scalar text used by loose equality and substring tests.
    pub fn as_comparable_text(&self) -> Option<String> {
        match self {
            AnswerValue::Text(text) => Some(text.clone()),
            AnswerValue::Number(value) => Some(format_number(*value)),
            AnswerValue::Boolean(value) => Some(value.to_string()),
            AnswerValue::Choices(items) => Some(items.join(",")),
            AnswerValue::Empty | AnswerValue::Files(_) | AnswerValue::Contact(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value).filter(|value| value.is_finite()),
            AnswerValue::Text(text) => parse_number(text),
            _ => None,
        }
    }

    /// Membership set for `contains`, or `None` when the answer is scalar.
    pub fn members(&self) -> Option<Vec<&str>> {
        match self {
            AnswerValue::Choices(items) => Some(items.iter().map(String::as_str).collect()),
            AnswerValue::Files(files) => {
                Some(files.iter().map(|file| file.name.as_str()).collect())
            }
            AnswerValue::Contact(contact) => Some(contact.filled_values().collect()),
            _ => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Empty => false,
            AnswerValue::Boolean(_) | AnswerValue::Number(_) => true,
            AnswerValue::Text(text) => !text.trim().is_empty(),
            AnswerValue::Choices(items) => !items.is_empty(),
            AnswerValue::Files(files) => !files.is_empty(),
            AnswerValue::Contact(contact) => contact.filled_values().next().is_some(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Boolean(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::Choices(items.into_iter().map(str::to_string).collect())
    }
}

/// Parses a JSON object of answers keyed by question id.
pub fn parse_answers(json: &str) -> Result<AnswerMap, FormError> {
    if json.trim().is_empty() {
        return Ok(AnswerMap::new());
    }
    serde_json::from_str(json).map_err(FormError::AnswersParse)
}

pub fn answers_from_value(value: Value) -> Result<AnswerMap, FormError> {
    serde_json::from_value(value).map_err(FormError::AnswersParse)
}

pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Text form of a number as the form renderer prints it: no zero fraction,
/// `-0` as `0`, exponent notation outside `[1e-6, 1e21)`.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !(1e-6..1e21).contains(&value.abs()) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    format!("{}", value)
}
