use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a numeric string (`"35"`, `"35.5"`) or a bare JSON number.
///
/// Strings must parse as a finite `f64` as they are; padding is not trimmed.
pub(crate) fn de_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of f64 range: {n}"))),
        Value::String(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(de::Error::custom(format!(
                "could not parse f64 from string: {s:?}"
            ))),
        },
        other => Err(de::Error::custom(format!(
            "expected number or string, got: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "de_f64_lenient")]
        v: f64,
    }

    fn parse(json: &str) -> Result<f64, serde_json::Error> {
        serde_json::from_str::<Wrapper>(json).map(|w| w.v)
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"v": 35}"#).unwrap(), 35.0);
        assert_eq!(parse(r#"{"v": "35"}"#).unwrap(), 35.0);
        assert_eq!(parse(r#"{"v": "12.25"}"#).unwrap(), 12.25);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse(r#"{"v": "fast"}"#).is_err());
        assert!(parse(r#"{"v": ""}"#).is_err());
        assert!(parse(r#"{"v": " 12.25 "}"#).is_err());
        assert!(parse(r#"{"v": "NaN"}"#).is_err());
        assert!(parse(r#"{"v": null}"#).is_err());
        assert!(parse(r#"{"v": [1]}"#).is_err());
    }
}
