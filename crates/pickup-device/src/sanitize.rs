//! Inbound text sanitization.
//!
//! The panel font only covers ASCII, so accented letters are transliterated
//! to their digraphs, everything outside a small whitelist is stripped, and
//! the result is trimmed and truncated to what fits on the display.

/// Longest text the physical display can usefully hold.
pub const MAX_LEN: usize = 25;

const ALLOWED_PUNCTUATION: &[char] = &[' ', '.', ',', '?', '!', '-'];

pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            c if c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c) => out.push(c),
            _ => {}
        }
    }

    let trimmed = out.trim();
    trimmed.chars().take(MAX_LEN).collect()
}
