//! # Property Sets
//!
//! Line-based `key=value` configuration, as persisted by the service
//! scheduler for each worker and publisher.
//!
//! - blank lines and lines starting with `#` or `!` are ignored
//! - `=` or `:` separate key and value; surrounding whitespace is trimmed
//! - later occurrences of a key override earlier ones

use crate::errors::ConfigError;

/// Parse a property set into ordered `(key, value)` pairs.
pub fn parse_properties(text: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let split_at = line
            .find(['=', ':'])
            .ok_or_else(|| ConfigError::Parse(format!("line {}: missing '='", index + 1)))?;
        let key = line[..split_at].trim();
        if key.is_empty() {
            return Err(ConfigError::Parse(format!("line {}: empty key", index + 1)));
        }
        let value = line[split_at + 1..].trim().to_string();
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value,
            None => pairs.push((key.to_string(), value)),
        }
    }
    Ok(pairs)
}

/// Property boolean: `true` in any letter case, everything else is false.
pub fn property_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_trims() {
        let pairs = parse_properties(
            "# publisher\n\n  storeCert = false \n! legacy comment\ndataSource:OcspDS\n",
        )
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("storeCert".to_string(), "false".to_string()),
                ("dataSource".to_string(), "OcspDS".to_string()),
            ]
        );
    }

    #[test]
    fn test_later_key_overrides() {
        let pairs = parse_properties("a=1\nb=2\na=3").unwrap();
        assert_eq!(pairs[0], ("a".to_string(), "3".to_string()));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_line_without_separator_is_parse_error() {
        assert!(matches!(
            parse_properties("just-a-word"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(parse_properties("=value"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_property_bool() {
        assert!(property_bool("TRUE"));
        assert!(property_bool(" true"));
        assert!(!property_bool("yes"));
        assert!(!property_bool(""));
    }
}
