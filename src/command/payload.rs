//! Read payload encoding.
//!
//! The downstream XML consumer expects a UTF-8 byte-order mark followed by
//! Latin-1 encoded text. The mismatch is part of the contract and must be
//! reproduced byte for byte.

/// UTF-8 byte-order mark prefixed to every payload.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encode text as BOM + Latin-1. Characters above U+00FF become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(BOM.len() + text.len());
    bytes.extend_from_slice(&BOM);
    bytes.extend(text.chars().map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')));
    bytes
}

/// Byte length `encode(text)` would produce.
pub fn encoded_len(text: &str) -> u64 {
    (BOM.len() + text.chars().count()) as u64
}

/// Wrap fragments in the `<users>` envelope.
///
/// Leading BOMs and XML declarations are dropped from each fragment so the
/// envelope stays a single well-formed document.
pub fn users_document(fragments: &[String]) -> String {
    let mut document = String::from("<users>");
    for fragment in fragments {
        document.push_str(strip_prolog(fragment));
    }
    document.push_str("</users>");
    document
}

fn strip_prolog(fragment: &str) -> &str {
    let fragment = fragment.trim_start_matches('\u{feff}').trim();
    if fragment.starts_with("<?xml") {
        if let Some(end) = fragment.find("?>") {
            return fragment[end + 2..].trim();
        }
    }
    fragment
}
