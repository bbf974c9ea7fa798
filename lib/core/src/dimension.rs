//! Dimension values and dimension sets
//!
//! Dimensions arrive from form input and backend rows with loose typing:
//! a field may hold a number, a string such as `"12.5"` or `"12.5mm"`, an
//! empty string, or nothing at all. [`DimensionValue`] keeps the raw form and
//! converts to a number leniently, never failing.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw dimension value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Number(f64),
    Text(String),
    /// Explicit `null`
    Unset,
}

impl DimensionValue {
    /// Whether the value carries any input at all.
    ///
    /// Unset values and empty strings are absent; everything else, including
    /// a literal `0` or an unparseable string, is present.
    pub fn is_present(&self) -> bool {
        match self {
            DimensionValue::Number(_) => true,
            DimensionValue::Text(s) => !s.is_empty(),
            DimensionValue::Unset => false,
        }
    }

    /// Numeric value with forgiving semantics: anything that does not parse
    /// to a finite number becomes `0.0`.
    pub fn as_f64_lenient(&self) -> f64 {
        let value = match self {
            DimensionValue::Number(n) => *n,
            DimensionValue::Text(s) => parse_lenient(s),
            DimensionValue::Unset => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Numeric value only when present, see [`DimensionValue::is_present`]
    pub fn present_f64(&self) -> Option<f64> {
        self.is_present().then(|| self.as_f64_lenient())
    }

    /// Strict numeric value: `None` for absent input, an error for input
    /// that has no numeric prefix.
    pub fn to_f64_strict(&self, field: &str) -> Result<Option<f64>> {
        match self {
            DimensionValue::Number(n) if n.is_finite() => Ok(Some(*n)),
            DimensionValue::Text(s) if s.is_empty() => Ok(None),
            DimensionValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| Error::InvalidDimension {
                    field: field.to_string(),
                    value: s.clone(),
                }),
            DimensionValue::Unset => Ok(None),
            DimensionValue::Number(n) => Err(Error::InvalidDimension {
                field: field.to_string(),
                value: n.to_string(),
            }),
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Number(n) => write!(f, "{}", n),
            DimensionValue::Text(s) => write!(f, "{:?}", s),
            DimensionValue::Unset => write!(f, "null"),
        }
    }
}

impl From<f64> for DimensionValue {
    fn from(value: f64) -> Self {
        DimensionValue::Number(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        DimensionValue::Text(value.to_string())
    }
}

impl From<String> for DimensionValue {
    fn from(value: String) -> Self {
        DimensionValue::Text(value)
    }
}

impl From<Option<f64>> for DimensionValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(DimensionValue::Unset, DimensionValue::Number)
    }
}

/// Parse the leading decimal literal of `s`, `0.0` if there is none.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12.5mm"`
/// parses as `12.5` and `"abc"` as `0.0`.
pub fn parse_lenient(s: &str) -> f64 {
    numeric_prefix(s.trim_start())
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Longest prefix matching `[+-]? digits [. digits] [(e|E) [+-]? digits]`
/// with at least one mantissa digit.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Sparse mapping from dimension name to raw value.
///
/// Keys iterate in sorted order, which keeps any fold over the set
/// independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionSet(BTreeMap<String, DimensionValue>);

impl DimensionSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a value, returning the previous one for that name
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<DimensionValue>,
    ) -> Option<DimensionValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DimensionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DimensionValue> {
        self.0.get(name)
    }

    /// The value for `name` if it is present (set and non-empty)
    pub fn get_present(&self, name: &str) -> Option<&DimensionValue> {
        self.0.get(name).filter(|v| v.is_present())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of keys, present or not
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DimensionValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Parse `name=value` arguments as typed on a command line.
    ///
    /// Values are kept as raw text and converted leniently at scoring time.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = DimensionSet::new();
        for arg in args {
            let arg = arg.as_ref();
            let (name, value) = arg
                .split_once('=')
                .ok_or_else(|| Error::InvalidDimensionArg(arg.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::InvalidDimensionArg(arg.to_string()));
            }
            set.insert(name, value.trim());
        }
        Ok(set)
    }
}

impl<K, V> FromIterator<(K, V)> for DimensionSet
where
    K: Into<String>,
    V: Into<DimensionValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a DimensionSet {
    type Item = (&'a String, &'a DimensionValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, DimensionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_lenient_plain_numbers() {
        assert_eq!(parse_lenient("42"), 42.0);
        assert_eq!(parse_lenient("-3.5"), -3.5);
        assert_eq!(parse_lenient("+7"), 7.0);
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("1e3"), 1000.0);
    }

    #[test]
    fn test_parse_lenient_forgiving_input() {
        assert_eq!(parse_lenient("  12.5mm"), 12.5);
        assert_eq!(parse_lenient("3.2.1"), 3.2);
        assert_eq!(parse_lenient("2e"), 2.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("."), 0.0);
        assert_eq!(parse_lenient(""), 0.0);
    }

    #[test]
    fn test_non_finite_coerces_to_zero() {
        assert_eq!(DimensionValue::from("1e400").as_f64_lenient(), 0.0);
        assert_eq!(DimensionValue::Number(f64::NAN).as_f64_lenient(), 0.0);
        assert_eq!(DimensionValue::Number(f64::INFINITY).as_f64_lenient(), 0.0);
    }

    #[test]
    fn test_presence() {
        assert!(DimensionValue::Number(0.0).is_present());
        assert!(DimensionValue::from("junk").is_present());
        assert!(!DimensionValue::from("").is_present());
        assert!(!DimensionValue::Unset.is_present());
        assert_eq!(DimensionValue::from("").present_f64(), None);
        assert_eq!(DimensionValue::from("junk").present_f64(), Some(0.0));
    }

    #[test]
    fn test_strict_conversion() {
        assert_eq!(DimensionValue::from(" 4.5 ").to_f64_strict("depth"), Ok(Some(4.5)));
        assert_eq!(DimensionValue::Unset.to_f64_strict("depth"), Ok(None));
        assert!(matches!(
            DimensionValue::from("4.5mm").to_f64_strict("depth"),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_deserialize_mixed_values() {
        let set: DimensionSet = serde_json::from_value(json!({
            "length": 100,
            "radius": "10",
            "width": "",
            "depth": null
        }))
        .unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.get("length"), Some(&DimensionValue::Number(100.0)));
        assert_eq!(set.get("radius"), Some(&DimensionValue::Text("10".into())));
        assert!(set.get_present("width").is_none());
        assert_eq!(set.get("depth"), Some(&DimensionValue::Unset));
    }

    #[test]
    fn test_from_args() {
        let set = DimensionSet::from_args(["frontRadius=5", " depth = 20.5 "]).unwrap();
        assert_eq!(set.get("frontRadius"), Some(&DimensionValue::Text("5".into())));
        assert_eq!(set.get("depth"), Some(&DimensionValue::Text("20.5".into())));

        assert!(matches!(
            DimensionSet::from_args(["depth"]),
            Err(Error::InvalidDimensionArg(_))
        ));
        assert!(matches!(
            DimensionSet::from_args(["=5"]),
            Err(Error::InvalidDimensionArg(_))
        ));
    }

    #[test]
    fn test_keys_are_sorted() {
        let set: DimensionSet = [("z", 1.0), ("a", 2.0), ("m", 3.0)].into_iter().collect();
        let keys: Vec<_> = set.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }
}
