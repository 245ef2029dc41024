//! Text clean-up for the portal's CSV files.
//!
//! Files arrive as UTF-8 or Windows-1252, and some cells carry UTF-8 that was
//! already mangled once (`Ã§` for `ç`). Everything is reduced to ASCII so
//! labels compare reliably.

use deunicode::deunicode;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;

/// Decode a downloaded file, falling back to Windows-1252 when it is not UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let text = match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    };
    text.trim_start_matches('\u{feff}').to_string()
}

/// Undo one round of UTF-8 bytes being read as Windows-1252.
pub fn repair_mojibake(value: &str) -> Cow<'_, str> {
    if !value.contains(['Ã', 'Â']) {
        return Cow::Borrowed(value);
    }
    let (bytes, _, unmappable) = WINDOWS_1252.encode(value);
    if unmappable {
        return Cow::Borrowed(value);
    }
    match String::from_utf8(bytes.into_owned()) {
        Ok(fixed) => Cow::Owned(fixed),
        Err(_) => Cow::Borrowed(value),
    }
}

/// Repair, transliterate to ASCII and trim a cell.
pub fn clean_cell(value: &str) -> String {
    deunicode(&repair_mojibake(value.trim())).trim().to_string()
}

/// Header names are matched case-insensitively, so they are also lowercased.
pub fn clean_header(value: &str) -> String {
    clean_cell(value).to_lowercase()
}

/// A category header row is labelled in capitals, except for the
/// "Sem classificação" bucket which the portal writes in mixed case.
pub fn is_category_label(label: &str) -> bool {
    let has_letter = label.chars().any(char::is_alphabetic);
    (has_letter && !label.chars().any(char::is_lowercase))
        || label.eq_ignore_ascii_case("sem classificacao")
}
