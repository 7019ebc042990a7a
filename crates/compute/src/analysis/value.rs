use serde::{Deserialize, Serialize};

/// Raw result stored against an analysis record.
///
/// The archive stores results as text, so the same metric may arrive as a
/// JSON number, a numeric string, or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisValue {
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl AnalysisValue {
    /// Numeric reading of the value; NaN when nothing numeric can be read.
    pub fn as_f64(&self) -> f64 {
        match self {
            AnalysisValue::Number(v) => *v,
            AnalysisValue::Text(s) => parse_float(s),
            AnalysisValue::Null => f64::NAN,
        }
    }
}

impl From<f64> for AnalysisValue {
    fn from(v: f64) -> Self {
        AnalysisValue::Number(v)
    }
}

impl From<&str> for AnalysisValue {
    fn from(s: &str) -> Self {
        AnalysisValue::Text(s.to_string())
    }
}

/// One named analysis result attached to a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub name: String,
    #[serde(default)]
    pub result: AnalysisValue,
}

impl AnalysisRecord {
    pub fn new(name: impl Into<String>, result: impl Into<AnalysisValue>) -> Self {
        Self {
            name: name.into(),
            result: result.into(),
        }
    }
}

/// Lenient float parse: leading whitespace (byte order mark included) is
/// skipped and the longest numeric prefix is read, so `"12.5%"` gives `12.5`.
/// Anything without a numeric prefix gives NaN.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float_reads_plain_numbers() {
        assert_eq!(parse_float("42"), 42.0);
        assert_eq!(parse_float("-0.25"), -0.25);
        assert_eq!(parse_float("+3"), 3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1.5e3"), 1500.0);
    }

    #[test]
    fn parse_float_takes_longest_numeric_prefix() {
        assert_eq!(parse_float("  12.5%"), 12.5);
        assert_eq!(parse_float("7e"), 7.0);
        assert_eq!(parse_float("7e+"), 7.0);
        assert_eq!(parse_float("1.25.5"), 1.25);
        assert_eq!(parse_float("-Infinity and beyond"), f64::NEG_INFINITY);
        assert_eq!(parse_float("\u{FEFF}5"), 5.0);
        assert_eq!(parse_float("\u{FEFF} \u{FEFF}-2.5kg"), -2.5);
    }

    #[test]
    fn parse_float_without_digits_is_nan() {
        for raw in ["", "abc", ".", "-", "e5", "True", "nan"] {
            assert!(parse_float(raw).is_nan(), "{raw:?} should be NaN");
        }
    }

    #[test]
    fn values_deserialize_from_numbers_strings_and_null() {
        let records: Vec<AnalysisRecord> = serde_json::from_str(
            r#"[
                {"name": "a", "result": 0.75},
                {"name": "b", "result": "0.5"},
                {"name": "c", "result": null},
                {"name": "d"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].result, AnalysisValue::Number(0.75));
        assert_eq!(records[1].result, AnalysisValue::Text("0.5".to_string()));
        assert_eq!(records[2].result, AnalysisValue::Null);
        assert_eq!(records[3].result, AnalysisValue::Null);

        assert_eq!(records[1].result.as_f64(), 0.5);
        assert!(records[2].result.as_f64().is_nan());
    }
}
