use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::AnswerMap;
use crate::error::FormError;
use crate::spec::question::QuestionSpec;
use crate::visibility::{VisibilityMap, compute_visibility};

/// A form as persisted by the authoring store.
///
/// Presentation fields (colors, images, thank-you copy) are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSpec {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
}

impl FormSpec {
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(FormError::FormParse)
    }

    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    /// Resolves the visibility of every question for the given answers.
    pub fn visibility(&self, answers: &AnswerMap) -> VisibilityMap {
        compute_visibility(&self.questions, answers)
    }
}
