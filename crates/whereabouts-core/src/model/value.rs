// ── Primitive cell values ──

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A primitive value in a flattened row: text or a number.
///
/// Booleans and any other scalar the wire might grow are carried as
/// text; the comparator below only distinguishes these two shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Total order over cell values.
    ///
    /// Numbers compare numerically (`f64::total_cmp`), text compares
    /// lexicographically, and in mixed columns numbers order before text.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // Whole numbers render without a trailing ".0" -- street
            // numbers and postcodes arrive as JSON numbers.
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{n:.0}")
            }
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(FieldValue::Number(52.0).to_string(), "52");
        assert_eq!(FieldValue::Number(56.1629).to_string(), "56.1629");
    }

    #[test]
    fn numbers_order_numerically_not_lexicographically() {
        let two = FieldValue::Number(2.0);
        let ten = FieldValue::Number(10.0);
        assert_eq!(two.total_cmp(&ten), Ordering::Less);
    }

    #[test]
    fn mixed_types_put_numbers_first() {
        let n = FieldValue::Number(99.0);
        let t = FieldValue::from("1");
        assert_eq!(n.total_cmp(&t), Ordering::Less);
        assert_eq!(t.total_cmp(&n), Ordering::Greater);
    }
}
