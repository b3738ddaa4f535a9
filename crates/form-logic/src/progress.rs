use serde::Serialize;
use thiserror::Error;

use crate::answers::AnswerMap;
use crate::spec::question::QuestionSpec;
use crate::visibility::{VisibilityMap, is_visible};

/// Reasons the runtime refuses to move past the current question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvanceError {
    #[error("question '{0}' is required")]
    Required(String),
}

/// Progress counters over visible questions that collect an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.answered >= self.total
    }
}

/// Index of the first visible question after `from`, or from the start when `from` is `None`.
pub fn next_visible(
    questions: &[QuestionSpec],
    visibility: &VisibilityMap,
    from: Option<usize>,
) -> Option<usize> {
    let start = from.map_or(0, |index| index + 1);
    questions
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, question)| is_visible(visibility, &question.id))
        .map(|(index, _)| index)
}

/// Index of the closest visible question before `from`.
pub fn previous_visible(
    questions: &[QuestionSpec],
    visibility: &VisibilityMap,
    from: usize,
) -> Option<usize> {
    questions
        .iter()
        .enumerate()
        .take(from.min(questions.len()))
        .rev()
        .find(|(_, question)| is_visible(visibility, &question.id))
        .map(|(index, _)| index)
}

pub fn is_answered(answers: &AnswerMap, question_id: &str) -> bool {
    answers
        .get(question_id)
        .is_some_and(|answer| answer.is_answered())
}

/// Checks whether the renderer may advance past `question`.
///
/// Hidden questions never block, even when marked required.
pub fn can_advance(
    question: &QuestionSpec,
    answers: &AnswerMap,
    visibility: &VisibilityMap,
) -> Result<(), AdvanceError> {
    if question.required
        && question.kind.collects_answer()
        && is_visible(visibility, &question.id)
        && !is_answered(answers, &question.id)
    {
        return Err(AdvanceError::Required(question.id.clone()));
    }
    Ok(())
}

pub fn progress(
    questions: &[QuestionSpec],
    answers: &AnswerMap,
    visibility: &VisibilityMap,
) -> Progress {
    questions
        .iter()
        .filter(|question| counts_toward_progress(question, visibility))
        .fold(Progress::default(), |mut progress, question| {
            progress.total += 1;
            if is_answered(answers, &question.id) {
                progress.answered += 1;
            }
            progress
        })
}

/// Where a resumed session should continue: the first visible required question still unanswered.
pub fn first_unanswered_required(
    questions: &[QuestionSpec],
    answers: &AnswerMap,
    visibility: &VisibilityMap,
) -> Option<usize> {
    let blocked = |question: &QuestionSpec| can_advance(question, answers, visibility).is_err();
    questions.iter().position(blocked)
}

fn counts_toward_progress(question: &QuestionSpec, visibility: &VisibilityMap) -> bool {
    question.kind.collects_answer() && is_visible(visibility, &question.id)
}
