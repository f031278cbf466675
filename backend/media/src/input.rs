//! Input normalization for image endpoints.
//!
//! Callers send either a remote URL or inline base64 data (optionally with a
//! `data:<mime>;base64,` header). Both are reduced to one canonical
//! `ImageReference` here; no network access happens in this module.

use base64::{engine::general_purpose::STANDARD, Engine};
use sightgate_core::{ImageReference, SightError};

/// Classify a request string as a remote URL or inline base64 payload.
pub fn normalize_image_input(raw: &str) -> Result<ImageReference, SightError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SightError::InvalidInput("no image data provided".into()));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(ImageReference::Url(trimmed.to_string()));
    }

    let (mime_type, encoded) = split_data_url(trimmed);
    let payload = STANDARD
        .decode(encoded)
        .map_err(|e| SightError::Decode(e.to_string()))?;
    if payload.is_empty() {
        return Err(SightError::InvalidInput("empty image payload".into()));
    }

    Ok(ImageReference::Base64 {
        payload,
        mime_type: mime_type.to_string(),
    })
}

/// Split an optional `data:<mime>;base64,` header off an inline payload.
/// Bare base64 is assumed to be a PNG.
fn split_data_url(input: &str) -> (&str, &str) {
    if let Some(rest) = input.strip_prefix("data:") {
        if let Some((header, body)) = rest.split_once(";base64,") {
            let mime = if header.is_empty() { "image/png" } else { header };
            return (mime, body);
        }
    }
    ("image/png", input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_urls() {
        let reference = normalize_image_input("https://example.com/cat.png").unwrap();
        assert_eq!(
            reference,
            ImageReference::Url("https://example.com/cat.png".into())
        );
    }

    #[test]
    fn round_trips_bare_base64() {
        let original = b"\x89PNG\r\n\x1a\nfake-image-bytes".to_vec();
        let encoded = STANDARD.encode(&original);
        match normalize_image_input(&encoded).unwrap() {
            ImageReference::Base64 { payload, mime_type } => {
                assert_eq!(payload, original);
                assert_eq!(mime_type, "image/png");
            }
            other => panic!("expected base64 reference, got {other:?}"),
        }
    }

    #[test]
    fn strips_data_url_header() {
        let original = b"jpeg-bytes".to_vec();
        let input = format!("data:image/jpeg;base64,{}", STANDARD.encode(&original));
        match normalize_image_input(&input).unwrap() {
            ImageReference::Base64 { payload, mime_type } => {
                assert_eq!(payload, original);
                assert_eq!(mime_type, "image/jpeg");
            }
            other => panic!("expected base64 reference, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(
            normalize_image_input("   "),
            Err(SightError::InvalidInput(_))
        ));
    }

    #[test]
    fn bad_base64_is_a_decode_error() {
        assert!(matches!(
            normalize_image_input("!!not-base64!!"),
            Err(SightError::Decode(_))
        ));
    }
}
