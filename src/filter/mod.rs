pub mod compare;

use std::fmt;

use crate::models::{Submission, Value};

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Equals,
    DoesNotEqual,
    GreaterThan,
    LessThan,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Equals,
        Condition::DoesNotEqual,
        Condition::GreaterThan,
        Condition::LessThan,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::DoesNotEqual => "does_not_equal",
            Condition::GreaterThan => "greater_than",
            Condition::LessThan => "less_than",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(question id, operator, operand)` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub id: String,
    pub condition: Condition,
    pub value: Value,
}

impl FilterClause {
    pub fn new(id: impl Into<String>, condition: Condition, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            condition,
            value: value.into(),
        }
    }

    /// Whether `submission` satisfies this clause.
    ///
    /// A submission without a question carrying this clause's id never
    /// matches, whatever the operator. In particular `does_not_equal` is
    /// false for a missing question rather than vacuously true.
    pub fn matches(&self, submission: &Submission) -> bool {
        let Some(question) = submission.question(&self.id) else {
            return false;
        };

        match self.condition {
            Condition::Equals => compare::strict_eq(&question.value, &self.value),
            Condition::DoesNotEqual => compare::strict_ne(&question.value, &self.value),
            Condition::GreaterThan => {
                compare::greater_than(question.kind(), &question.value, &self.value)
            }
            Condition::LessThan => {
                compare::less_than(question.kind(), &question.value, &self.value)
            }
        }
    }
}

/// Conjunction of clauses. The empty expression matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    pub clauses: Vec<FilterClause>,
}

impl FilterExpression {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Self { clauses }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        self.clauses.iter().all(|clause| clause.matches(submission))
    }
}

impl From<Vec<FilterClause>> for FilterExpression {
    fn from(clauses: Vec<FilterClause>) -> Self {
        Self::new(clauses)
    }
}

/// Keep the submissions matching every clause of `filter`, in their original order.
pub fn evaluate(filter: &FilterExpression, submissions: &[Submission]) -> Vec<Submission> {
    submissions
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect()
}
