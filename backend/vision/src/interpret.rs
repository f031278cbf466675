//! Response interpretation policies.
//!
//! All three treat "could not parse" as a successful `Unrecognized` result.
//! Errors are reserved for upstream failures (bad input, network, API).

use sightgate_core::ExtractedResult;

/// Length of a valid Aadhaar identifier.
pub const NUMERIC_ID_DIGITS: usize = 12;

/// Shortest reply accepted as a decoded code value.
pub const MIN_CODE_LEN: usize = 4;

/// Yes/no decision: only the first whitespace-separated token of the
/// lower-cased reply is inspected. "YES, 92%" is true; "confidence: yes"
/// is false. Empty replies are false.
pub fn interpret_decision(raw: &str) -> bool {
    raw.to_lowercase()
        .split_whitespace()
        .next()
        .is_some_and(|token| token.contains("yes"))
}

/// Numeric identifier: strip every non-digit character; exactly 12 digits
/// remaining is a valid identifier, anything else is `Unrecognized`.
pub fn interpret_numeric_id(raw: &str) -> ExtractedResult {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == NUMERIC_ID_DIGITS {
        ExtractedResult::NumericId { digits }
    } else {
        ExtractedResult::Unrecognized
    }
}

/// Code value: the trimmed reply verbatim when it is at least four
/// characters, otherwise `Unrecognized`.
pub fn interpret_code(raw: &str) -> ExtractedResult {
    let text = raw.trim();
    if text.len() >= MIN_CODE_LEN {
        ExtractedResult::CodeValue {
            text: text.to_string(),
        }
    } else {
        ExtractedResult::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_yes_token_is_true() {
        assert!(interpret_decision("YES, 92% confidence"));
        assert!(interpret_decision("yes."));
    }

    #[test]
    fn leading_no_token_is_false() {
        assert!(!interpret_decision("No, not plastic"));
    }

    #[test]
    fn empty_reply_is_false() {
        assert!(!interpret_decision(""));
        assert!(!interpret_decision("   "));
    }

    #[test]
    fn yes_after_the_first_token_does_not_count() {
        // Strict first-token check, not a substring search over the text.
        assert!(!interpret_decision("confidence: yes"));
    }

    #[test]
    fn spaced_digits_form_a_valid_identifier() {
        assert_eq!(
            interpret_numeric_id("1234 5678 9012"),
            ExtractedResult::NumericId {
                digits: "123456789012".into()
            }
        );
    }

    #[test]
    fn wrong_digit_count_is_unrecognized() {
        assert_eq!(interpret_numeric_id("12345"), ExtractedResult::Unrecognized);
        assert_eq!(
            interpret_numeric_id("1234567890123"),
            ExtractedResult::Unrecognized
        );
    }

    #[test]
    fn digits_survive_surrounding_prose() {
        assert_eq!(
            interpret_numeric_id("The number is 1234-5678-9012."),
            ExtractedResult::NumericId {
                digits: "123456789012".into()
            }
        );
    }

    #[test]
    fn code_values_pass_through_trimmed() {
        assert_eq!(
            interpret_code("  ABC123 \n"),
            ExtractedResult::CodeValue {
                text: "ABC123".into()
            }
        );
    }

    #[test]
    fn short_replies_are_unrecognized() {
        assert_eq!(interpret_code("no"), ExtractedResult::Unrecognized);
        assert_eq!(interpret_code(""), ExtractedResult::Unrecognized);
    }
}
