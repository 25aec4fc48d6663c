//! Hive-style partition directory naming.

use std::fmt::Write as _;

use polars::prelude::AnyValue;

/// Directory value used when a partition key is null.
pub const HIVE_DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Renders a partition key value as it appears in a `key=value` directory.
///
/// Nulls and empty strings map to [`HIVE_DEFAULT_PARTITION`]; characters that
/// are unsafe in a path segment are percent-escaped.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use songplay_output::partition_value;
///
/// assert_eq!(partition_value(&AnyValue::Int32(2018)), "2018");
/// assert_eq!(partition_value(&AnyValue::String("a/b")), "a%2Fb");
/// assert_eq!(partition_value(&AnyValue::Null), "__HIVE_DEFAULT_PARTITION__");
/// ```
pub fn partition_value(value: &AnyValue<'_>) -> String {
    let raw = match value {
        AnyValue::Null => return HIVE_DEFAULT_PARTITION.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    };
    if raw.is_empty() {
        return HIVE_DEFAULT_PARTITION.to_string();
    }
    escape_path_segment(&raw)
}

/// `key=value` directory name for one partition tier.
pub fn partition_dir(key: &str, value: &AnyValue<'_>) -> String {
    format!("{}={}", escape_path_segment(key), partition_value(value))
}

fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '"' | '#' | '%' | '\'' | '*' | '/' | ':' | '=' | '?' | '\\' | '{' | '[' | ']' | '^'
        )
}

fn escape_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if needs_escape(c) {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{byte:02X}");
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_plain_values() {
        assert_eq!(partition_dir("year", &AnyValue::Int32(2000)), "year=2000");
        assert_eq!(
            partition_dir("artist_id", &AnyValue::String("ARJIE2Y1187B994AB7")),
            "artist_id=ARJIE2Y1187B994AB7"
        );
    }

    #[test]
    fn null_and_empty_use_default_partition() {
        assert_eq!(partition_dir("year", &AnyValue::Null), "year=__HIVE_DEFAULT_PARTITION__");
        assert_eq!(partition_value(&AnyValue::String("")), HIVE_DEFAULT_PARTITION);
    }

    #[test]
    fn escapes_separators() {
        assert_eq!(partition_value(&AnyValue::String("x=1/2")), "x%3D1%2F2");
        assert_eq!(partition_value(&AnyValue::String("50%")), "50%25");
        assert_eq!(partition_value(&AnyValue::String("Tom Waits")), "Tom Waits");
    }
}
