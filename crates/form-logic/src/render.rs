use serde::Serialize;
use serde_json::Value;

use crate::answers::AnswerMap;
use crate::progress::{Progress, is_answered, next_visible, progress};
use crate::spec::form::FormSpec;
use crate::spec::question::QuestionType;
use crate::visibility::{VisibilityMap, is_visible};

/// Describes a single question for report outputs.
#[derive(Debug, Clone, Serialize)]
pub struct ReportQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub prompt: String,
    pub required: bool,
    pub visible: bool,
    pub answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Value>,
}

/// Visibility state of a whole form for one answer snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityReport {
    pub form_id: String,
    pub form_title: String,
    pub next_question_id: Option<String>,
    pub progress: Progress,
    pub questions: Vec<ReportQuestion>,
}

impl VisibilityReport {
    pub fn visible_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| question.visible)
            .count()
    }
}

pub fn build_report(spec: &FormSpec, answers: &AnswerMap) -> VisibilityReport {
    let visibility = spec.visibility(answers);
    let next_question_id = next_unanswered(spec, answers, &visibility)
        .map(|index| spec.questions[index].id.clone());

    let questions = spec
        .questions
        .iter()
        .map(|question| ReportQuestion {
            id: question.id.clone(),
            kind: question.kind,
            prompt: question.prompt.clone(),
            required: question.required,
            visible: is_visible(&visibility, &question.id),
            answered: is_answered(answers, &question.id),
            current_value: answers.get(&question.id).map(|answer| answer.to_json()),
        })
        .collect();

    VisibilityReport {
        form_id: spec.id.clone(),
        form_title: spec.title.clone(),
        next_question_id,
        progress: progress(&spec.questions, answers, &visibility),
        questions,
    }
}

/// First visible question, in form order, that still needs an answer.
pub fn next_unanswered(
    spec: &FormSpec,
    answers: &AnswerMap,
    visibility: &VisibilityMap,
) -> Option<usize> {
    let mut cursor = next_visible(&spec.questions, visibility, None);
    while let Some(index) = cursor {
        let question = &spec.questions[index];
        if question.kind.collects_answer() && !is_answered(answers, &question.id) {
            return Some(index);
        }
        cursor = next_visible(&spec.questions, visibility, Some(index));
    }
    None
}

pub fn render_json(report: &VisibilityReport) -> Value {
    serde_json::to_value(report).unwrap_or(Value::Null)
}

/// Render the report as human-friendly text.
pub fn render_text(report: &VisibilityReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", report.form_title, report.form_id));
    lines.push(format!(
        "Progress: {}/{}",
        report.progress.answered, report.progress.total
    ));
    match &report.next_question_id {
        Some(next) => lines.push(format!("Next question: {}", next)),
        None => lines.push("Next question: none (complete)".to_string()),
    }

    lines.push("Questions:".to_string());
    for question in &report.questions {
        let mut entry = format!(
            " {} {} ({})",
            if question.visible { "+" } else { "-" },
            question.id,
            question.kind.label()
        );
        if question.required {
            entry.push_str(" [required]");
        }
        if !question.prompt.is_empty() {
            entry.push_str(&format!(": {}", question.prompt));
        }
        if let Some(value) = &question.current_value {
            entry.push_str(&format!(" = {}", value_to_display(value)));
        }
        lines.push(entry);
    }

    lines.join("\n")
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
