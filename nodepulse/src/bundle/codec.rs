//! Base64 subscription encoding.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

/// Outcome of attempting to decode a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleDecode {
    /// The input was base64 and decoded to UTF-8 text.
    Decoded(String),
    /// The input is not bundle-encoded and is returned as-is.
    Plain(String),
}

impl BundleDecode {
    /// The usable text, whichever way it was obtained.
    pub fn into_text(self) -> String {
        match self {
            BundleDecode::Decoded(text) | BundleDecode::Plain(text) => text,
        }
    }

    pub fn was_decoded(&self) -> bool {
        matches!(self, BundleDecode::Decoded(_))
    }
}

/// Join raw descriptors with `\n` and encode with padded standard base64.
pub fn encode_bundle<S: AsRef<str>>(descriptors: &[S]) -> String {
    let joined = descriptors
        .iter()
        .map(|d| d.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    STANDARD.encode(joined.as_bytes())
}

/// Decode a bundle, falling back to the input text when it is not one.
///
/// Whitespace (including line wrapping) is ignored. Standard and URL-safe
/// alphabets are accepted, with or without padding. Decoded bytes that are
/// not valid UTF-8 also count as "not a bundle".
pub fn decode_bundle(text: &str) -> BundleDecode {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return BundleDecode::Plain(text.to_string());
    }

    let decoded = STANDARD
        .decode(&compact)
        .or_else(|_| STANDARD_NO_PAD.decode(&compact))
        .or_else(|_| URL_SAFE.decode(&compact))
        .or_else(|_| URL_SAFE_NO_PAD.decode(&compact));

    match decoded.map(String::from_utf8) {
        Ok(Ok(decoded)) => BundleDecode::Decoded(decoded),
        _ => BundleDecode::Plain(text.to_string()),
    }
}
