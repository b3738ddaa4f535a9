use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc::Sender;

use tracing::{debug, trace};

use crate::answers::AnswerMap;
use crate::condition;
use crate::spec::question::QuestionSpec;

pub type VisibilityMap = BTreeMap<String, bool>;

/// Receives the full visibility map after every recomputation.
pub trait VisibilityObserver {
    fn on_visibility(&self, visibility: &VisibilityMap);
}

impl<F> VisibilityObserver for F
where
    F: Fn(&VisibilityMap),
{
    fn on_visibility(&self, visibility: &VisibilityMap) {
        self(visibility)
    }
}

impl VisibilityObserver for Sender<VisibilityMap> {
    fn on_visibility(&self, visibility: &VisibilityMap) {
        // A dropped receiver only means nobody is listening any more.
        let _ = self.send(visibility.clone());
    }
}

/// Resolves which questions are visible for the current answers.
///
/// Every question starts at its static default. Rules are then applied in
/// question order and, within a question, in rule order; a satisfied rule
/// sets its target to shown or hidden and later rules overwrite earlier ones.
/// Unsatisfied rules leave the target untouched. Rules that reference an
/// unknown source or target question are skipped.
pub fn compute_visibility(questions: &[QuestionSpec], answers: &AnswerMap) -> VisibilityMap {
    let mut map = VisibilityMap::new();
    for question in questions {
        map.entry(question.id.clone())
            .or_insert_with(|| question.starts_visible());
    }
    let known: BTreeSet<&str> = questions
        .iter()
        .map(|question| question.id.as_str())
        .collect();

    let mut fired = 0usize;
    for question in questions {
        for rule in &question.logic {
            if !known.contains(rule.source_question_id.as_str()) {
                trace!(
                    rule = %rule.id,
                    source = %rule.source_question_id,
                    "skipping rule with unknown source"
                );
                continue;
            }
            let Some(slot) = map.get_mut(&rule.target_question_id) else {
                trace!(
                    rule = %rule.id,
                    target = %rule.target_question_id,
                    "skipping rule with unknown target"
                );
                continue;
            };
            let answer = answers.get(&rule.source_question_id);
            if condition::evaluate(rule.condition, answer, &rule.value) {
                *slot = rule.action.is_show();
                fired += 1;
                trace!(
                    rule = %rule.id,
                    target = %rule.target_question_id,
                    visible = *slot,
                    "rule fired"
                );
            }
        }
    }

    debug!(
        questions = map.len(),
        rules_fired = fired,
        "visibility resolved"
    );
    map
}

/// Same as [`compute_visibility`], notifying `observer` once with the result.
pub fn compute_visibility_with<O>(
    questions: &[QuestionSpec],
    answers: &AnswerMap,
    observer: &O,
) -> VisibilityMap
where
    O: VisibilityObserver + ?Sized,
{
    let map = compute_visibility(questions, answers);
    observer.on_visibility(&map);
    map
}

pub fn is_visible(visibility: &VisibilityMap, question_id: &str) -> bool {
    visibility.get(question_id).copied().unwrap_or(true)
}
