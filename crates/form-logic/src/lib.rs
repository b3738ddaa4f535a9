#![allow(missing_docs)]

pub mod answers;
pub mod condition;
pub mod error;
pub mod lint;
pub mod progress;
pub mod render;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerMap, AnswerValue, ContactAnswer, UploadedFile, parse_answers};
pub use error::FormError;
pub use lint::{LintError, RuleIssue, Severity, ensure_valid, lint};
pub use progress::{
    AdvanceError, Progress, can_advance, first_unanswered_required, next_visible, previous_visible,
};
pub use render::{VisibilityReport, build_report, next_unanswered, render_json, render_text};
pub use spec::{
    ComparisonValue, Condition, FormSpec, LogicRule, QuestionSpec, QuestionType, RuleAction,
};
pub use validate::{ValidationError, ValidationResult, validate};
pub use visibility::{
    VisibilityMap, VisibilityObserver, compute_visibility, compute_visibility_with, is_visible,
};

/// JSON schema describing the persisted form format.
pub fn form_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(FormSpec)).unwrap_or(serde_json::Value::Null)
}
