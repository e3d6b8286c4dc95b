use crate::collate::collate;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// A single field value of a [`Record`](crate::record::Record).
///
/// Records are open-ended, so a field may hold any of these variants and different records may
/// hold different variants under the same key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Integer(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Text used for search matching, or `None` for a null value.
    pub fn to_search_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Formats like JavaScript's `Number.prototype.toString`: exponent notation outside
/// `1e-6..1e21`, `Infinity` for infinities.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        return f.write_str("0");
    }
    if x.is_nan() || (1e-6..1e21).contains(&x.abs()) {
        return write!(f, "{x}");
    }
    let exp = format!("{x:e}");
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => write!(f, "{mantissa}e+{e}"),
        _ => f.write_str(&exp),
    }
}

/// Ordering key of a field value in a sorted column.
///
/// `sort_by` needs a total order, which [`compare_values`] is not once kinds mix. Keys order
/// numbers first, then text, then booleans, then [`SortKey::Unordered`] (absent or null
/// fields, lists, NaN), and all unordered keys are equal.
#[derive(Clone, Copy, Debug)]
pub enum SortKey<'a> {
    /// Numeric value plus the saturated integer value, so that large integers that round to
    /// the same `f64` still order exactly.
    Number(f64, i64),
    Text(&'a str),
    Bool(bool),
    Unordered,
}

impl<'a> SortKey<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Integer(i)) => SortKey::Number(*i as f64, *i),
            // `+ 0.0` folds -0.0 into 0.0.
            Some(Value::Float(x)) if !x.is_nan() => SortKey::Number(x + 0.0, *x as i64),
            Some(Value::Text(s)) => SortKey::Text(s),
            Some(Value::Bool(b)) => SortKey::Bool(*b),
            _ => SortKey::Unordered,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(..) => 0,
            SortKey::Text(_) => 1,
            SortKey::Bool(_) => 2,
            SortKey::Unordered => 3,
        }
    }

    /// Whether both keys are of the same kind, i.e. [`compare_values`] orders them.
    pub fn same_kind(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(x, i), SortKey::Number(y, j)) => x.total_cmp(y).then(i.cmp(j)),
            (SortKey::Text(a), SortKey::Text(b)) => collate(a, b),
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}

/// Pairwise comparison of two (possibly absent) field values.
///
/// Text compares with [`collate`], numbers numerically, booleans `false < true`. Anything else
/// (absent or null fields, mixed variants, lists, NaN) is neither less nor greater and yields
/// `Equal`. This is not transitive across kinds; sort with [`SortKey`].
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = (SortKey::of(a), SortKey::of(b));
    if a.same_kind(&b) {
        a.cmp(&b)
    } else {
        Ordering::Equal
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            obj @ serde_json::Value::Object(_) => Value::Text(obj.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(
            Value::List(vec![Value::from(1), Value::from("a")]).to_string(),
            "1,a"
        );
    }

    #[test]
    fn null_has_no_search_text() {
        assert_eq!(Value::Null.to_search_text(), None);
        assert_eq!(Value::Integer(0).to_search_text().as_deref(), Some("0"));
        assert_eq!(Value::Bool(false).to_search_text().as_deref(), Some("false"));
    }

    #[test]
    fn numbers_compare_across_variants() {
        let a = Value::Integer(2);
        let b = Value::Float(2.5);
        assert_eq!(compare_values(Some(&a), Some(&b)), Ordering::Less);
        assert_eq!(compare_values(Some(&b), Some(&a)), Ordering::Greater);
    }

    #[test]
    fn incomparable_values_are_equal() {
        let text = Value::from("10");
        let num = Value::from(3);
        let nan = Value::Float(f64::NAN);
        assert_eq!(compare_values(Some(&text), Some(&num)), Ordering::Equal);
        assert_eq!(compare_values(Some(&num), None), Ordering::Equal);
        assert_eq!(compare_values(None, None), Ordering::Equal);
        assert_eq!(compare_values(Some(&nan), Some(&num)), Ordering::Equal);
        assert_eq!(
            compare_values(Some(&Value::Null), Some(&Value::Null)),
            Ordering::Equal
        );
    }

    #[test]
    fn sort_keys_group_kinds_in_a_total_order() {
        let three = Value::from(3);
        let one = Value::from(1);
        let x = Value::from("x");
        let nan = Value::Float(f64::NAN);
        fn key(v: &Value) -> SortKey<'_> {
            SortKey::of(Some(v))
        }
        assert!(key(&one) < key(&three));
        assert!(key(&three) < key(&x));
        assert!(key(&x) < key(&Value::Bool(false)));
        assert!(key(&Value::Bool(true)) < key(&nan));
        assert_eq!(key(&nan), SortKey::of(None));
        assert_eq!(key(&Value::Null), key(&Value::List(vec![])));
        assert_eq!(key(&Value::Float(-0.0)), key(&Value::Integer(0)));
        assert_eq!(key(&Value::Float(2.0)), key(&Value::Integer(2)));
    }

    #[test]
    fn large_integers_order_exactly() {
        let a = Value::Integer((1 << 53) + 1);
        let b = Value::Integer(1 << 53);
        assert_eq!(compare_values(Some(&a), Some(&b)), Ordering::Greater);
    }

    #[test]
    fn floats_display_like_javascript() {
        assert_eq!(Value::Float(1e21).to_string(), "1e+21");
        assert_eq!(Value::Float(-2.5e21).to_string(), "-2.5e+21");
        assert_eq!(Value::Float(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Value::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Float(0.000001).to_string(), "0.000001");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(-0.0).to_string(), "0");
    }

    #[test]
    fn converts_from_json() {
        let v: Value = serde_json::from_str(r#"[1, 2.5, "x", null, true, {"a": 1}]"#).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::Text("x".into()),
                Value::Null,
                Value::Bool(true),
                Value::Text(r#"{"a":1}"#.into()),
            ])
        );
    }
}
