//! Single-column filter predicates built from raw request values.
//!
//! Every builder takes `(attribute, raw_value, qualifier)` and returns
//! `None` when the value cannot be turned into a predicate. A bad value never
//! fails the search; it just filters nothing.
//!
//! Column names and qualifiers always come from the schema. Raw values only
//! ever end up as bound parameters (see [`Predicate::bound_values`]).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{Attribute, AttributeKind};
use crate::sql::SqlValue;

/// A column reference qualified by a table name or join alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Column {
    pub qualifier: String,
    pub name: String,
}

impl Column {
    pub fn new(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.qualifier, self.name)
    }
}

/// Ordering comparison used by `<`, `>`, `<=` and `>=` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter condition over one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Case-insensitive `LIKE` against a `%`-wrapped pattern
    Contains { column: Column, pattern: String },
    /// Inclusive numeric range
    Between { column: Column, low: f64, high: f64 },
    /// Numeric ordering comparison
    Compare {
        column: Column,
        op: CompareOp,
        value: f64,
    },
    /// Numeric equality
    NumericEquals { column: Column, value: f64 },
    /// Boolean column compared through its `"1"`/`"0"` text form
    BooleanEquals { column: Column, value: bool },
    /// Plain equality against the raw value
    Equals { column: Column, value: String },
}

impl Predicate {
    pub fn column(&self) -> &Column {
        match self {
            Predicate::Contains { column, .. }
            | Predicate::Between { column, .. }
            | Predicate::Compare { column, .. }
            | Predicate::NumericEquals { column, .. }
            | Predicate::BooleanEquals { column, .. }
            | Predicate::Equals { column, .. } => column,
        }
    }

    /// Values to bind, in placeholder order.
    pub fn bound_values(&self) -> Vec<SqlValue> {
        match self {
            Predicate::Contains { pattern, .. } => vec![SqlValue::Text(pattern.clone())],
            Predicate::Between { low, high, .. } => {
                vec![SqlValue::Float(*low), SqlValue::Float(*high)]
            }
            Predicate::Compare { value, .. } | Predicate::NumericEquals { value, .. } => {
                vec![SqlValue::Float(*value)]
            }
            Predicate::BooleanEquals { value, .. } => {
                let text = if *value { "1" } else { "0" };
                vec![SqlValue::Text(text.to_string())]
            }
            Predicate::Equals { value, .. } => vec![SqlValue::Text(value.clone())],
        }
    }
}

fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Reads like the compiled condition, with bound values inlined.
impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Contains { column, pattern } => {
                write!(f, "{} LIKE {}", column, quoted(pattern))
            }
            Predicate::Between { column, low, high } => {
                write!(f, "{} BETWEEN {} AND {}", column, low, high)
            }
            Predicate::Compare { column, op, value } => write!(f, "{} {} {}", column, op, value),
            Predicate::NumericEquals { column, value } => write!(f, "{} = {}", column, value),
            Predicate::BooleanEquals { column, value } => {
                write!(f, "{} = {}", column, quoted(if *value { "1" } else { "0" }))
            }
            Predicate::Equals { column, value } => write!(f, "{} = {}", column, quoted(value)),
        }
    }
}

/// Signature shared by all per-kind predicate builders.
pub type PredicateFn = fn(&str, &str, &str) -> Option<Predicate>;

/// Dispatch table from attribute kind to predicate builder.
///
/// `Other` has no builder; such attributes are never filtered on.
pub fn builder_for(kind: AttributeKind) -> Option<PredicateFn> {
    match kind {
        AttributeKind::String | AttributeKind::Text => Some(text_predicate),
        AttributeKind::Integer | AttributeKind::Float => Some(numeric_predicate),
        AttributeKind::Boolean => Some(boolean_predicate),
        AttributeKind::Other => None,
    }
}

/// Build the predicate for `attribute` from `params`, qualified by `qualifier`.
///
/// Returns `None` when the parameter is absent, the kind is not searchable or
/// the value does not parse.
pub fn build_predicate(
    attribute: &Attribute,
    params: &BTreeMap<String, String>,
    qualifier: &str,
) -> Option<Predicate> {
    let raw = params.get(&attribute.name)?;
    let Some(builder) = builder_for(attribute.kind) else {
        tracing::trace!(
            attribute = %attribute.name,
            kind = %attribute.kind,
            "skipping attribute of unsearchable kind"
        );
        return None;
    };
    let predicate = builder(&attribute.name, raw, qualifier);
    if predicate.is_none() {
        tracing::trace!(attribute = %attribute.name, value = %raw, "skipping unparsable value");
    }
    predicate
}

/// Substring match, ignoring case. An empty value matches every non-null row.
pub fn text_predicate(attribute: &str, raw: &str, qualifier: &str) -> Option<Predicate> {
    Some(Predicate::Contains {
        column: Column::new(qualifier, attribute),
        pattern: format!("%{}%", raw),
    })
}

/// How a raw numeric filter value should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOperator {
    /// `low-high`
    Range,
    /// `<v`, `>v`, `<=v`, `>=v`
    Compare(CompareOp),
    /// Plain number
    Exact,
}

/// Find the operator in a raw numeric value.
///
/// The first of `-`, `<`, `>` decides the form; a `=` anywhere turns `<`/`>`
/// into `<=`/`>=`. A `-` seen first wins even when `<`/`>` follow it.
pub fn detect_operator(raw: &str) -> NumericOperator {
    let has_eq = raw.contains('=');
    match raw.chars().find(|c| matches!(c, '-' | '<' | '>')) {
        Some('-') => NumericOperator::Range,
        Some('<') if has_eq => NumericOperator::Compare(CompareOp::Le),
        Some('<') => NumericOperator::Compare(CompareOp::Lt),
        Some('>') if has_eq => NumericOperator::Compare(CompareOp::Ge),
        Some('>') => NumericOperator::Compare(CompareOp::Gt),
        _ => NumericOperator::Exact,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let value = s.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Range, comparison or equality over a numeric column.
pub fn numeric_predicate(attribute: &str, raw: &str, qualifier: &str) -> Option<Predicate> {
    let column = Column::new(qualifier, attribute);
    match detect_operator(raw) {
        NumericOperator::Range => {
            let (low, high) = raw.split_once('-')?;
            Some(Predicate::Between {
                column,
                low: parse_number(low)?,
                high: parse_number(high)?,
            })
        }
        NumericOperator::Compare(op) => {
            let rest = raw.trim_start().strip_prefix(op.as_str())?;
            Some(Predicate::Compare {
                column,
                op,
                value: parse_number(rest)?,
            })
        }
        NumericOperator::Exact => Some(Predicate::NumericEquals {
            column,
            value: parse_number(raw)?,
        }),
    }
}

/// Whether a raw value reads as "true": `true`, `t`, `yes`, `y` or `1`, any case.
pub fn canonical_boolean(raw: &str) -> bool {
    let value = raw.trim();
    ["true", "t", "yes", "y", "1"]
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
}

/// Boolean match. Always yields a predicate; unrecognised values mean false.
pub fn boolean_predicate(attribute: &str, raw: &str, qualifier: &str) -> Option<Predicate> {
    Some(Predicate::BooleanEquals {
        column: Column::new(qualifier, attribute),
        value: canonical_boolean(raw),
    })
}

/// Plain equality against the raw value, for any column type.
///
/// Not part of the kind dispatch; available to callers that want an exact match.
pub fn equality_predicate(attribute: &str, raw: &str, qualifier: &str) -> Option<Predicate> {
    Some(Predicate::Equals {
        column: Column::new(qualifier, attribute),
        value: raw.to_string(),
    })
}
