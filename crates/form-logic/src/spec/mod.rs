pub mod form;
pub mod question;
pub mod rule;

pub use form::FormSpec;
pub use question::{QuestionSpec, QuestionType};
pub use rule::{ComparisonValue, Condition, LogicRule, RuleAction};
