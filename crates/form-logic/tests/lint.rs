use serde_json::json;

use form_logic::{FormSpec, RuleIssue, Severity, ensure_valid, lint};

fn form(questions: serde_json::Value) -> FormSpec {
    let spec = json!({
        "id": "lint-form",
        "title": "Lint",
        "questions": questions
    });
    serde_json::from_value(spec).expect("deserialize")
}

fn is_error(issue: &RuleIssue) -> bool {
    issue.severity() == Severity::Error
}

#[test]
fn clean_form_has_no_issues() {
    let spec = FormSpec::from_json(include_str!("../tests/fixtures/branching_form.json"))
        .expect("deserialize");
    assert!(lint(&spec).is_empty());
    assert!(ensure_valid(&spec).is_ok());
}

#[test]
fn dangling_references_are_errors() {
    let spec = form(json!([
        {
            "id": "a",
            "type": "text",
            "logic": [
                {
                    "id": "r1",
                    "questionId": "a",
                    "condition": "equals",
                    "value": "x",
                    "action": "show",
                    "targetQuestionId": "deleted"
                },
                {
                    "id": "r2",
                    "questionId": "gone",
                    "condition": "equals",
                    "value": "x",
                    "action": "show",
                    "targetQuestionId": "a"
                }
            ]
        }
    ]));

    let issues = lint(&spec);
    assert_eq!(
        issues,
        vec![
            RuleIssue::DanglingTarget {
                rule_id: "r1".into(),
                owner: "a".into(),
                target_id: "deleted".into(),
            },
            RuleIssue::DanglingSource {
                rule_id: "r2".into(),
                owner: "a".into(),
                source_id: "gone".into(),
            },
        ]
    );
    assert!(issues.iter().all(is_error));

    let error = ensure_valid(&spec).expect_err("dangling rules");
    assert_eq!(error.issues.len(), 2);
    let message = error.to_string();
    assert!(message.contains("targets unknown question 'deleted'"));
}

#[test]
fn warnings_do_not_fail_validation() {
    let spec = form(json!([
        { "id": "intro", "type": "statement" },
        {
            "id": "age",
            "type": "number",
            "logic": [
                {
                    "id": "r1",
                    "questionId": "age",
                    "condition": "greaterThan",
                    "value": "ten",
                    "action": "hide",
                    "targetQuestionId": "age"
                },
                {
                    "id": "r1",
                    "questionId": "intro",
                    "condition": "equals",
                    "value": "x",
                    "action": "hide",
                    "targetQuestionId": "age"
                }
            ]
        }
    ]));

    let codes: Vec<&str> = lint(&spec).iter().map(RuleIssue::code).collect();
    assert_eq!(
        codes,
        vec![
            "self_reference",
            "non_numeric_comparison",
            "duplicate_rule",
            "source_without_answer",
        ]
    );
    assert!(ensure_valid(&spec).is_ok());
}

#[test]
fn duplicate_question_ids_are_reported_once() {
    let spec = form(json!([
        { "id": "a", "type": "text" },
        { "id": "a", "type": "email" },
        { "id": "a", "type": "url" }
    ]));
    assert_eq!(
        lint(&spec),
        vec![RuleIssue::DuplicateQuestion {
            question_id: "a".into(),
        }]
    );
}
