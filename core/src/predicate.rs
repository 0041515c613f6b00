//! Row-selection predicates, filters and mutation objects.
//!
//! A predicate is a plain boolean expression tree over the fields of one
//! resource type. It carries no store handle: the same tree is executed as a
//! query or checked against a single loaded record by the condition crate.

use crate::{Fields, Value};
use chrono::NaiveDate;
use std::fmt;

/// Caller-supplied partial row-selection criteria, keyed by field name.
pub type FilterSpec = Fields;

/// Caller-supplied partial field-update payload, keyed by field name.
pub type MutationObject = Fields;

/// A boolean row-selection expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Selects every row.
    True,
    /// Selects nothing.
    False,
    /// Field equals value.
    Eq { field: String, value: Value },
    /// String field contains the given fragment.
    Contains { field: String, fragment: String },
    /// Date field lies within an inclusive range; a missing bound is open.
    Between {
        field: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Field value is one of the values projected by a subquery.
    In { field: String, source: Subquery },
    /// Every operand holds.
    And(Vec<Predicate>),
    /// At least one operand holds.
    Or(Vec<Predicate>),
}

/// The values of `column` over the rows of `type_name` matching `predicate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub type_name: String,
    pub column: String,
    pub predicate: Box<Predicate>,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            fragment: fragment.into(),
        }
    }

    pub fn between(
        field: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self::Between {
            field: field.into(),
            start,
            end,
        }
    }

    /// `field IN (SELECT column FROM type_name WHERE predicate)`.
    pub fn in_subquery(
        field: impl Into<String>,
        type_name: impl Into<String>,
        column: impl Into<String>,
        predicate: Predicate,
    ) -> Self {
        Self::In {
            field: field.into(),
            source: Subquery {
                type_name: type_name.into(),
                column: column.into(),
                predicate: Box::new(predicate),
            },
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Predicate::False)
    }

    /// Top-level conjuncts of this predicate.
    pub fn conjuncts(&self) -> &[Predicate] {
        match self {
            Predicate::And(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::True => write!(f, "TRUE"),
            Predicate::False => write!(f, "FALSE"),
            Predicate::Eq { field, value } => write!(f, "{} = {}", field, value),
            Predicate::Contains { field, fragment } => write!(f, "{} ~ \"{}\"", field, fragment),
            Predicate::Between { field, start, end } => {
                let bound = |d: &Option<NaiveDate>| {
                    d.map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "*".to_string())
                };
                write!(f, "{} IN [{}, {}]", field, bound(start), bound(end))
            }
            Predicate::In { field, source } => write!(
                f,
                "{} IN ({}.{} WHERE {})",
                field, source.type_name, source.column, source.predicate
            ),
            Predicate::And(items) => write_joined(f, items, " AND "),
            Predicate::Or(items) => write_joined(f, items, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, ")")
}
