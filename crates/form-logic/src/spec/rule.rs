use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::{format_number, parse_number};

/// Comparison applied to the source question's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
}

impl Condition {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Condition::GreaterThan | Condition::LessThan)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::NotEquals => "notEquals",
            Condition::Contains => "contains",
            Condition::NotContains => "notContains",
            Condition::GreaterThan => "greaterThan",
            Condition::LessThan => "lessThan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RuleAction {
    Show,
    Hide,
}

impl RuleAction {
    pub fn is_show(&self) -> bool {
        matches!(self, RuleAction::Show)
    }
}

/// Value a rule compares the source answer against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ComparisonValue {
    Number(f64),
    Text(String),
}

impl ComparisonValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ComparisonValue::Number(value) => Some(*value).filter(|value| value.is_finite()),
            ComparisonValue::Text(text) => parse_number(text),
        }
    }
}

impl fmt::Display for ComparisonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonValue::Number(value) => f.write_str(&format_number(*value)),
            ComparisonValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ComparisonValue {
    fn from(value: &str) -> Self {
        ComparisonValue::Text(value.to_string())
    }
}

impl From<f64> for ComparisonValue {
    fn from(value: f64) -> Self {
        ComparisonValue::Number(value)
    }
}

/// If the source answer satisfies `condition` against `value`, apply `action`
/// to the target question.
///
/// The owning question is only where the rule is edited; the rule always acts
/// on `target_question_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogicRule {
    pub id: String,
    #[serde(rename = "questionId", alias = "sourceQuestionId")]
    pub source_question_id: String,
    pub condition: Condition,
    #[serde(alias = "comparisonValue")]
    pub value: ComparisonValue,
    pub action: RuleAction,
    pub target_question_id: String,
}

impl LogicRule {
    pub fn new(
        id: impl Into<String>,
        source_question_id: impl Into<String>,
        condition: Condition,
        value: impl Into<ComparisonValue>,
        action: RuleAction,
        target_question_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_question_id: source_question_id.into(),
            condition,
            value: value.into(),
            action,
            target_question_id: target_question_id.into(),
        }
    }

    pub fn is_self_referencing(&self) -> bool {
        self.source_question_id == self.target_question_id
    }
}
