use serde_json::json;

use form_logic::answers::answers_from_value;
use form_logic::progress::progress;
use form_logic::{
    AdvanceError, AnswerMap, FormSpec, build_report, can_advance, first_unanswered_required,
    next_visible, previous_visible, render_json, render_text,
};

fn spec() -> FormSpec {
    FormSpec::from_json(include_str!("../tests/fixtures/branching_form.json")).expect("deserialize")
}

fn answers(value: serde_json::Value) -> AnswerMap {
    answers_from_value(value).expect("answers")
}

#[test]
fn navigation_skips_hidden_questions() {
    let spec = spec();
    let answers = answers(json!({ "attending": "No" }));
    let visibility = spec.visibility(&answers);

    assert_eq!(next_visible(&spec.questions, &visibility, None), Some(0));
    // guests (1) is hidden, reason (2) is shown.
    assert_eq!(next_visible(&spec.questions, &visibility, Some(0)), Some(2));
    // parking (3) stays hidden.
    assert_eq!(next_visible(&spec.questions, &visibility, Some(2)), Some(4));
    assert_eq!(next_visible(&spec.questions, &visibility, Some(5)), None);

    assert_eq!(previous_visible(&spec.questions, &visibility, 4), Some(2));
    assert_eq!(previous_visible(&spec.questions, &visibility, 2), Some(0));
    assert_eq!(previous_visible(&spec.questions, &visibility, 0), None);
}

#[test]
fn required_visible_question_blocks_advance() {
    let spec = spec();
    let answers = answers(json!({}));
    let visibility = spec.visibility(&answers);

    let attending = spec.question("attending").expect("question");
    assert_eq!(
        can_advance(attending, &answers, &visibility),
        Err(AdvanceError::Required("attending".into()))
    );

    // guests is required but hidden until attending == "Yes".
    let guests = spec.question("guests").expect("question");
    assert_eq!(can_advance(guests, &answers, &visibility), Ok(()));
}

#[test]
fn resume_points_at_first_blocking_question() {
    let spec = spec();
    let answers = answers(json!({ "attending": "Yes" }));
    let visibility = spec.visibility(&answers);

    assert_eq!(
        first_unanswered_required(&spec.questions, &answers, &visibility),
        spec.position("guests")
    );
}

#[test]
fn progress_counts_visible_answerable_questions() {
    let spec = spec();
    let answers = answers(json!({ "attending": "No", "reason": "Busy" }));
    let visibility = spec.visibility(&answers);

    // attending, reason, contact; the statement block is not counted.
    let counts = progress(&spec.questions, &answers, &visibility);
    assert_eq!(counts.total, 3);
    assert_eq!(counts.answered, 2);
    assert!(!counts.is_complete());
}

#[test]
fn report_lists_next_question_and_visibility() {
    let spec = spec();
    let report = build_report(&spec, &answers(json!({ "attending": "Yes" })));

    assert_eq!(report.next_question_id.as_deref(), Some("guests"));
    assert_eq!(report.visible_count(), 4);

    let text = render_text(&report);
    assert!(text.contains("Next question: guests"));
    assert!(text.contains(" - reason"));
    assert!(text.contains(" + attending (multipleChoice) [required]"));

    let ui = render_json(&report);
    assert_eq!(ui["form_id"], "event-signup");
    assert_eq!(ui["progress"]["total"], 3);
    let questions = ui["questions"].as_array().expect("questions array");
    assert_eq!(questions[0]["current_value"], "Yes");
    assert_eq!(questions[0]["type"], "multipleChoice");
}
