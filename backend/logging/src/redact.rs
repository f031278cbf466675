//! Log Redaction Layer
//!
//! Scrubs API keys and bearer tokens from strings before they reach log
//! output or client-visible error bodies. Upstream error text can echo the
//! request that produced it, credentials included.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(gsk_[a-zA-Z0-9]{20,})|(sk-[a-zA-Z0-9]{32,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)")
        .unwrap()
});

/// Redacts credential-shaped substrings.
pub fn redact_sensitive_data(input: &str) -> String {
    API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrubs_bearer_tokens() {
        let raw = "401 from upstream with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(clean.contains("[REDACTED_TOKEN]"));
    }

    #[test]
    fn scrubs_groq_style_keys() {
        let raw = "request failed for key gsk_abcdefghij0123456789xyz";
        assert!(!redact_sensitive_data(raw).contains("gsk_"));
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(
            redact_sensitive_data("no frames could be extracted"),
            "no frames could be extracted"
        );
    }
}
