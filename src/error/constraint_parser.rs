use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Extracts table, column and offending value from constraint names such as
/// `cars_registration_number_key` and from the `DETAIL` line Postgres attaches
/// to the message.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    relation_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)"
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value pattern"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
            // "relation" in check/not-null messages, "table" in others
            relation_name: Regex::new(r#"(?:relation|table) "([^"]+)""#)
                .expect("valid relation pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Suffixes Postgres uses for generated constraint names.
const CONSTRAINT_SUFFIXES: &[&str] = &["_key", "_check", "_idx", "_pkey", "_not_null"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique constraint violation into `(entity, field, value)`.
    ///
    /// The constraint name is preferred; the message's `Key (...)=(...)`
    /// detail supplies the value and serves as a fallback for the field.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        key_value.map(|(field, value)| {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            (entity, field, value)
        })
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a check constraint violation into `(entity, field)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a generated constraint name into table and column.
    ///
    /// - `cars_registration_number_key` -> `("cars", "registration_number")`
    /// - `cars_status_check` -> `("cars", "status")`
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(message)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .relation_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIQUE_MESSAGE: &str = "duplicate key value violates unique constraint \"cars_registration_number_key\"\nDETAIL: Key (registration_number)=(ABC123) already exists.";

    #[test]
    fn test_parse_constraint_name_multi_word_column() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("cars_registration_number_key"),
            Some(("cars".to_string(), "registration_number".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("cars_status_check"),
            Some(("cars".to_string(), "status".to_string()))
        );
    }

    #[test]
    fn test_parse_constraint_name_rejects_unknown_suffix() {
        assert_eq!(ConstraintParser::parse_constraint_name("cars_status_whatever"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("cars_key"), None);
    }

    #[test]
    fn test_parse_unique_violation_with_constraint_name() {
        let result = ConstraintParser::parse_unique_violation(
            UNIQUE_MESSAGE,
            Some("cars_registration_number_key"),
        );
        assert_eq!(
            result,
            Some((
                "cars".to_string(),
                "registration_number".to_string(),
                "ABC123".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_from_message_only() {
        let result = ConstraintParser::parse_unique_violation(UNIQUE_MESSAGE, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "registration_number".to_string(),
                "ABC123".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_detail() {
        let result = ConstraintParser::parse_unique_violation("duplicate key", None);
        assert_eq!(result, None);
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message = "null value in column \"status\" of relation \"cars\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message, None),
            Some(("cars".to_string(), "status".to_string()))
        );
    }

    #[test]
    fn test_parse_check_violation() {
        let message = "new row for relation \"cars\" violates check constraint \"cars_status_check\"";
        assert_eq!(
            ConstraintParser::parse_check_violation(message, Some("cars_status_check")),
            Some(("cars".to_string(), "status".to_string()))
        );
    }
}
