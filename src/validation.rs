//! Field validation and sanitization for catalog writes.
//!
//! Each entity form declares an ordered rule table (field, submitted value,
//! rules); [`validate`] interprets the table and collects every failure in
//! table order. Callers sanitize values with [`sanitize`] before storing or
//! re-presenting them.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// A single field-level validation failure, in rule-table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A validation rule applied to one submitted field value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Non-empty after trim, optionally bounded in length.
    Required {
        max_len: Option<usize>,
        message: &'static str,
    },
    /// Letters only, no digits or punctuation (empty passes; pair with
    /// `Required`). Used for personal-name fields.
    Alphabetic { message: &'static str },
    /// Empty accepted; otherwise must parse as a complete `%Y-%m-%d` date.
    OptionalDate { message: &'static str },
}

impl Rule {
    pub const fn required(message: &'static str) -> Self {
        Rule::Required { max_len: None, message }
    }

    pub const fn required_max(max_len: usize, message: &'static str) -> Self {
        Rule::Required { max_len: Some(max_len), message }
    }

    pub const fn alphabetic(message: &'static str) -> Self {
        Rule::Alphabetic { message }
    }

    pub const fn optional_date(message: &'static str) -> Self {
        Rule::OptionalDate { message }
    }
}

/// Run an ordered rule table over submitted values.
///
/// Every rule is evaluated (no short-circuit within a field), so the caller
/// gets the full list of problems for form re-presentation.
pub fn validate(checks: &[(&str, &str, &[Rule])]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for (field, value, rules) in checks {
        let trimmed = value.trim();
        for rule in *rules {
            let message = match rule {
                Rule::Required { max_len, message } => {
                    let too_long = max_len.map_or(false, |max| trimmed.chars().count() > max);
                    if trimmed.is_empty() || too_long {
                        Some(*message)
                    } else {
                        None
                    }
                }
                Rule::Alphabetic { message } => {
                    if trimmed.chars().all(char::is_alphabetic) {
                        None
                    } else {
                        Some(*message)
                    }
                }
                Rule::OptionalDate { message } => {
                    if trimmed.is_empty() || parse_date(trimmed).is_some() {
                        None
                    } else {
                        Some(*message)
                    }
                }
            };

            if let Some(message) = message {
                errors.push(FieldError {
                    field: field.to_string(),
                    message: message.to_string(),
                });
            }
        }
    }

    errors
}

/// Trim surrounding whitespace and escape HTML metacharacters.
///
/// Applied to every text field destined for storage or redisplay.
pub fn sanitize(raw: &str) -> String {
    escape_html(raw.trim())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert a validated optional date field to a typed value.
/// Empty or unparseable input yields `None`.
pub fn parse_optional_date(raw: &str) -> Option<NaiveDate> {
    parse_date(raw.trim())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &[Rule] = &[Rule::required("First name must be specified.")];
    const REQUIRED_ALPHA: &[Rule] = &[
        Rule::required("First name must be specified."),
        Rule::alphabetic("First name has non alphanumeric characters."),
    ];
    const OPT_DATE: &[Rule] = &[Rule::optional_date("Invalid date of birth")];

    #[test]
    fn required_rejects_empty_and_whitespace() {
        assert!(validate(&[("first_name", "John", REQUIRED)]).is_empty());

        let errors = validate(&[("first_name", "   ", REQUIRED)]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "first_name");
        assert_eq!(errors[0].message, "First name must be specified.");
    }

    #[test]
    fn required_max_len_bounds_trimmed_value() {
        let rules: &[Rule] = &[Rule::required_max(5, "Too long")];
        assert!(validate(&[("name", "  abcde  ", rules)]).is_empty());
        assert_eq!(validate(&[("name", "abcdef", rules)]).len(), 1);
    }

    #[test]
    fn alphabetic_rejects_digits_punctuation_and_spaces() {
        assert!(validate(&[("first_name", "John", REQUIRED_ALPHA)]).is_empty());

        for bad in ["John1", "John-Paul", "John Paul", "Sm!th"] {
            let errors = validate(&[("first_name", bad, REQUIRED_ALPHA)]);
            assert_eq!(errors.len(), 1, "expected {:?} to fail", bad);
            assert_eq!(errors[0].message, "First name has non alphanumeric characters.");
        }
    }

    #[test]
    fn empty_value_fails_required_only() {
        // One error, not two: the letters check passes vacuously on empty input.
        let errors = validate(&[("first_name", "", REQUIRED_ALPHA)]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "First name must be specified.");
    }

    #[test]
    fn optional_date_accepts_empty_and_complete_dates() {
        assert!(validate(&[("date_of_birth", "", OPT_DATE)]).is_empty());
        assert!(validate(&[("date_of_birth", "1920-01-02", OPT_DATE)]).is_empty());
    }

    #[test]
    fn optional_date_rejects_partial_or_malformed() {
        for bad in ["2020-1", "2020", "2020-13-40", "notadate", "01/02/1920"] {
            let errors = validate(&[("date_of_birth", bad, OPT_DATE)]);
            assert_eq!(errors.len(), 1, "expected {:?} to fail", bad);
            assert_eq!(errors[0].message, "Invalid date of birth");
        }
    }

    #[test]
    fn errors_come_back_in_table_order() {
        let errors = validate(&[
            ("first_name", "", REQUIRED_ALPHA),
            ("family_name", "Sm!th", REQUIRED_ALPHA),
            ("date_of_birth", "nope", OPT_DATE),
        ]);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["first_name", "family_name", "date_of_birth"]);
    }

    #[test]
    fn sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  plain  "), "plain");
        assert_eq!(
            sanitize("<b>R&D</b> \"q\" 'a'"),
            "&lt;b&gt;R&amp;D&lt;/b&gt; &quot;q&quot; &#x27;a&#x27;"
        );
    }

    #[test]
    fn parse_optional_date_converts_or_yields_none() {
        assert_eq!(
            parse_optional_date(" 1920-01-02 "),
            NaiveDate::from_ymd_opt(1920, 1, 2)
        );
        assert_eq!(parse_optional_date(""), None);
        assert_eq!(parse_optional_date("2020-13-40"), None);
    }
}
