//! Legacy single-byte text.
//!
//! Names stored by the legacy game (score completers, park and ride names in
//! the user string table) use a Western European code page. Decoding stops
//! at the first null byte.

use encoding_rs::WINDOWS_1252;
use tracing::debug;

/// Decodes a null-terminated legacy string into UTF-8.
pub fn decode_legacy(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let bytes = &bytes[..len];

    let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
    if had_errors {
        debug!(
            "Legacy text decoding had errors for bytes: {:?}",
            &bytes[..bytes.len().min(20)]
        );
    }
    decoded.into_owned()
}

/// Encodes `text` into a fixed-size, null-padded legacy field.
///
/// Text longer than `size - 1` bytes is truncated so the field always keeps a
/// terminator.
pub fn encode_legacy(text: &str, size: usize) -> Vec<u8> {
    let (encoded, _, _) = WINDOWS_1252.encode(text);
    let mut out = vec![0u8; size];
    let len = encoded.len().min(size.saturating_sub(1));
    out[..len].copy_from_slice(&encoded[..len]);
    out
}
