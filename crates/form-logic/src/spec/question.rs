use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::spec::rule::LogicRule;

/// Kinds of questions a form can contain, using the store's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    Text,
    LongText,
    Number,
    /// Single choice rendered as radio buttons.
    MultipleChoice,
    /// Multiple choice; answers are a list of the selected options.
    Checkbox,
    Date,
    Email,
    Signature,
    /// Markdown text block. Collects no answer.
    Statement,
    Url,
    SingleSelect,
    FileUpload,
    ContactInfo,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::LongText => "longText",
            QuestionType::Number => "number",
            QuestionType::MultipleChoice => "multipleChoice",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Date => "date",
            QuestionType::Email => "email",
            QuestionType::Signature => "signature",
            QuestionType::Statement => "statement",
            QuestionType::Url => "url",
            QuestionType::SingleSelect => "singleSelect",
            QuestionType::FileUpload => "fileUpload",
            QuestionType::ContactInfo => "contactInfo",
        }
    }

    pub fn collects_answer(&self) -> bool {
        !matches!(self, QuestionType::Statement)
    }

    /// Question types whose answer must be one of the declared options.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::Checkbox | QuestionType::SingleSelect
        )
    }
}

/// Single question definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(rename = "question", default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(
        default,
        alias = "rules",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    #[schemars(with = "Option<Vec<LogicRule>>")]
    pub logic: Vec<LogicRule>,
}

impl QuestionSpec {
    pub fn new(id: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            kind,
            prompt: String::new(),
            options: None,
            statement: None,
            required: false,
            visible: None,
            logic: Vec::new(),
        }
    }

    /// Visibility before any rule fires; only an explicit `visible: false` hides.
    pub fn starts_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

/// Stored forms may carry `"logic": null` for questions that never had rules.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LogicRule>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<LogicRule>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
