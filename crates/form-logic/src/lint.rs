//! Authoring-time checks for rule integrity.
//!
//! The visibility engine tolerates every problem reported here; these checks
//! exist so the authoring surface can flag them before a form is published.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use thiserror::Error;

use crate::spec::form::FormSpec;
use crate::spec::question::QuestionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleIssue {
    #[error("question id '{question_id}' is used more than once")]
    DuplicateQuestion { question_id: String },
    #[error("rule id '{rule_id}' is used more than once")]
    DuplicateRule { rule_id: String },
    #[error("rule '{rule_id}' on '{owner}' reads unknown question '{source_id}'")]
    DanglingSource {
        rule_id: String,
        owner: String,
        source_id: String,
    },
    #[error("rule '{rule_id}' on '{owner}' targets unknown question '{target_id}'")]
    DanglingTarget {
        rule_id: String,
        owner: String,
        target_id: String,
    },
    #[error("rule '{rule_id}' reads '{source_id}', a {kind} block that never has an answer")]
    SourceWithoutAnswer {
        rule_id: String,
        source_id: String,
        kind: &'static str,
    },
    #[error("rule '{rule_id}' shows or hides its own source question '{question_id}'")]
    SelfReference {
        rule_id: String,
        question_id: String,
    },
    #[error("rule '{rule_id}' uses {condition} with non-numeric value '{value}'")]
    NonNumericComparison {
        rule_id: String,
        condition: &'static str,
        value: String,
    },
}

impl RuleIssue {
    pub fn severity(&self) -> Severity {
        match self {
            RuleIssue::DuplicateQuestion { .. }
            | RuleIssue::DanglingSource { .. }
            | RuleIssue::DanglingTarget { .. } => Severity::Error,
            RuleIssue::DuplicateRule { .. }
            | RuleIssue::SourceWithoutAnswer { .. }
            | RuleIssue::SelfReference { .. }
            | RuleIssue::NonNumericComparison { .. } => Severity::Warning,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RuleIssue::DuplicateQuestion { .. } => "duplicate_question",
            RuleIssue::DuplicateRule { .. } => "duplicate_rule",
            RuleIssue::DanglingSource { .. } => "dangling_source",
            RuleIssue::DanglingTarget { .. } => "dangling_target",
            RuleIssue::SourceWithoutAnswer { .. } => "source_without_answer",
            RuleIssue::SelfReference { .. } => "self_reference",
            RuleIssue::NonNumericComparison { .. } => "non_numeric_comparison",
        }
    }
}

#[derive(Debug, Error)]
#[error("form '{form_id}' has {} rule error(s): {}", .issues.len(), summary(.issues))]
pub struct LintError {
    pub form_id: String,
    pub issues: Vec<RuleIssue>,
}

fn summary(issues: &[RuleIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reports every integrity problem, in question order.
pub fn lint(spec: &FormSpec) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    let mut kinds: BTreeMap<&str, QuestionType> = BTreeMap::new();
    let mut reported = BTreeSet::new();
    for question in &spec.questions {
        if kinds.insert(question.id.as_str(), question.kind).is_some()
            && reported.insert(question.id.as_str())
        {
            issues.push(RuleIssue::DuplicateQuestion {
                question_id: question.id.clone(),
            });
        }
    }

    let mut rule_ids = BTreeSet::new();
    for question in &spec.questions {
        for rule in &question.logic {
            if !rule_ids.insert(rule.id.as_str()) {
                issues.push(RuleIssue::DuplicateRule {
                    rule_id: rule.id.clone(),
                });
            }

            match kinds.get(rule.source_question_id.as_str()) {
                None => issues.push(RuleIssue::DanglingSource {
                    rule_id: rule.id.clone(),
                    owner: question.id.clone(),
                    source_id: rule.source_question_id.clone(),
                }),
                Some(kind) if !kind.collects_answer() => {
                    issues.push(RuleIssue::SourceWithoutAnswer {
                        rule_id: rule.id.clone(),
                        source_id: rule.source_question_id.clone(),
                        kind: kind.label(),
                    })
                }
                Some(_) => {}
            }

            if !kinds.contains_key(rule.target_question_id.as_str()) {
                issues.push(RuleIssue::DanglingTarget {
                    rule_id: rule.id.clone(),
                    owner: question.id.clone(),
                    target_id: rule.target_question_id.clone(),
                });
            }

            if rule.is_self_referencing() {
                issues.push(RuleIssue::SelfReference {
                    rule_id: rule.id.clone(),
                    question_id: rule.target_question_id.clone(),
                });
            }

            if rule.condition.is_numeric() && rule.value.as_number().is_none() {
                issues.push(RuleIssue::NonNumericComparison {
                    rule_id: rule.id.clone(),
                    condition: rule.condition.as_str(),
                    value: rule.value.to_string(),
                });
            }
        }
    }

    issues
}

/// Fails when any error-severity issue is present; warnings pass.
pub fn ensure_valid(spec: &FormSpec) -> Result<(), LintError> {
    let issues: Vec<RuleIssue> = lint(spec)
        .into_iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(LintError {
            form_id: spec.id.clone(),
            issues,
        })
    }
}
