//! Insertion-ordered storage for transports with conditional bulk removal.

use crate::error::CommandError;
use crate::transport::{FieldValue, Transport};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a removal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Greater,
    Less,
    Equal,
}

impl Operator {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Operator::Greater => ordering == Ordering::Greater,
            Operator::Less => ordering == Ordering::Less,
            Operator::Equal => ordering == Ordering::Equal,
        }
    }
}

impl FromStr for Operator {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::Greater),
            "<" => Ok(Operator::Less),
            "==" => Ok(Operator::Equal),
            other => Err(CommandError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Equal => "==",
        })
    }
}

/// Numeric right-hand side of a condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// Order a field value against a number. Text never compares with numbers.
fn compare(field: FieldValue<'_>, value: Number) -> Option<Ordering> {
    match (field, value) {
        (FieldValue::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (FieldValue::Int(a), Number::Float(b)) => (a as f64).partial_cmp(&b),
        (FieldValue::Float(a), Number::Int(b)) => a.partial_cmp(&(b as f64)),
        (FieldValue::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        (FieldValue::Text(_), _) => None,
    }
}

/// A `field operator value` predicate over transports.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: Number,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Number>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// True when the transport has the field and the comparison holds.
    pub fn matches(&self, transport: &Transport) -> bool {
        transport
            .field(&self.field)
            .and_then(|field| compare(field, self.value))
            .is_some_and(|ordering| self.operator.holds(ordering))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Ordered collection of transports. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Container {
    items: Vec<Transport>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end.
    pub fn add(&mut self, transport: Transport) {
        self.items.push(transport);
    }

    /// Remove every transport matching `condition`, keeping the others in order.
    ///
    /// Returns how many were removed.
    pub fn remove_where(&mut self, condition: &Condition) -> usize {
        let before = self.items.len();
        self.items.retain(|transport| !condition.matches(transport));
        before - self.items.len()
    }

    /// Remove every transport for which `field operator value` holds.
    ///
    /// An unsupported operator matches nothing, as does a field the transport
    /// does not have.
    pub fn remove_by_condition(
        &mut self,
        field: &str,
        operator: &str,
        value: impl Into<Number>,
    ) -> usize {
        match operator.parse::<Operator>() {
            Ok(operator) => self.remove_where(&Condition::new(field, operator, value)),
            Err(_) => 0,
        }
    }

    /// Descriptions of all transports, in insertion order.
    pub fn print_all(&self) -> impl Iterator<Item = String> + '_ {
        self.items.iter().map(Transport::info)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transport> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
