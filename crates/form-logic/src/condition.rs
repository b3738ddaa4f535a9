use std::cmp::Ordering;

use crate::answers::AnswerValue;
use crate::spec::rule::{ComparisonValue, Condition};

/// Evaluates a rule condition against the source question's answer.
///
/// An absent answer satisfies no condition, negated ones included.
pub fn evaluate(
    condition: Condition,
    answer: Option<&AnswerValue>,
    value: &ComparisonValue,
) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    match condition {
        Condition::Equals => loose_equals(answer, value).unwrap_or(false),
        Condition::NotEquals => loose_equals(answer, value).is_some_and(|equal| !equal),
        Condition::Contains => contains(answer, value).unwrap_or(false),
        Condition::NotContains => contains(answer, value).is_some_and(|found| !found),
        Condition::GreaterThan => compare_numbers(answer, value).is_some_and(Ordering::is_gt),
        Condition::LessThan => compare_numbers(answer, value).is_some_and(Ordering::is_lt),
    }
}

/// Equality on the text forms of both sides; `None` when the answer has no text form.
fn loose_equals(answer: &AnswerValue, value: &ComparisonValue) -> Option<bool> {
    let left = answer.as_comparable_text()?;
    Some(left == value.to_string())
}

/// Membership for list-shaped answers, substring search for scalars.
fn contains(answer: &AnswerValue, value: &ComparisonValue) -> Option<bool> {
    let needle = value.to_string();
    if let Some(members) = answer.members() {
        return Some(members.iter().any(|member| *member == needle));
    }
    answer
        .as_comparable_text()
        .map(|haystack| haystack.contains(&needle))
}

fn compare_numbers(answer: &AnswerValue, value: &ComparisonValue) -> Option<Ordering> {
    let left = answer.as_number()?;
    let right = value.as_number()?;
    left.partial_cmp(&right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{ContactAnswer, UploadedFile};

    fn check(
        condition: Condition,
        answer: impl Into<AnswerValue>,
        value: impl Into<ComparisonValue>,
    ) -> bool {
        evaluate(condition, Some(&answer.into()), &value.into())
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            url: None,
            size: None,
            content_type: None,
        }
    }

    #[test]
    fn equals_is_loose_between_numbers_and_text() {
        assert!(check(Condition::Equals, 5.0, "5"));
        assert!(check(Condition::Equals, "5", "5"));
        assert!(check(Condition::Equals, "5", 5.0));
        assert!(!check(Condition::Equals, "5.0", "5"));
        assert!(check(Condition::Equals, -0.0, "0"));
        assert!(check(Condition::Equals, 1e21, "1e+21"));
    }

    #[test]
    fn not_equals_needs_an_answer() {
        let yes = ComparisonValue::from("Yes");
        assert!(check(Condition::NotEquals, "No", "Yes"));
        assert!(!check(Condition::NotEquals, "Yes", "Yes"));
        assert!(!evaluate(Condition::NotEquals, None, &yes));
        assert!(!check(Condition::NotEquals, AnswerValue::Empty, "Yes"));
    }

    #[test]
    fn contains_tests_membership_for_lists() {
        let colors = vec!["Red", "Blue"];
        assert!(check(Condition::Contains, colors.clone(), "Red"));
        assert!(!check(Condition::NotContains, colors, "Red"));

        assert!(!check(Condition::Contains, vec!["Reddish"], "Red"));
        assert!(check(Condition::NotContains, vec!["Reddish"], "Red"));
    }

    #[test]
    fn contains_matches_uploaded_file_names() {
        let files = AnswerValue::Files(vec![file("cv.pdf"), file("photo.png")]);
        assert!(check(Condition::Contains, files.clone(), "cv.pdf"));
        assert!(!check(Condition::Contains, files.clone(), "cv"));
        assert!(check(Condition::NotContains, files, "notes.txt"));
    }

    #[test]
    fn contains_matches_filled_contact_fields() {
        let contact = AnswerValue::Contact(ContactAnswer {
            first_name: Some("Ada".into()),
            company: Some("Analytical Engines".into()),
            phone: Some("  ".into()),
            ..ContactAnswer::default()
        });
        assert!(check(Condition::Contains, contact.clone(), "Ada"));
        assert!(!check(Condition::Contains, contact.clone(), "  "));
        assert!(check(Condition::NotContains, contact.clone(), "Lovelace"));
        assert!(!check(Condition::Equals, contact, "Ada"));
    }

    #[test]
    fn contains_tests_substrings_for_scalars() {
        assert!(check(Condition::Contains, "hello", "ell"));
        assert!(check(Condition::NotContains, "world", "ell"));
        assert!(check(Condition::Contains, 1234.0, 23.0));
    }

    #[test]
    fn numeric_conditions_reject_non_numeric_operands() {
        assert!(check(Condition::GreaterThan, "11", 10.0));
        assert!(check(Condition::LessThan, 9.5, 10.0));
        assert!(!check(Condition::GreaterThan, "abc", 10.0));
        assert!(!check(Condition::LessThan, "abc", 10.0));
        assert!(!check(Condition::GreaterThan, 11.0, "ten"));
        assert!(!check(Condition::GreaterThan, 10.0, 10.0));
    }
}
