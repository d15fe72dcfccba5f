//! Character-level Unicode classification for romanized Taiwanese text.

use unicode_normalization::char::decompose_canonical;

/// Combining diacritics in U+0300..U+030D. This is wider than the set of
/// recognized tone marks (it includes the caron, for instance) so that a
/// syllable carrying an unknown mark is still scanned as one token.
pub fn is_tone_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{030D}').contains(&c)
}

/// POJ nasalization: superscript n (ⁿ) and the dot above right of o͘.
pub fn is_nasal_marker(c: char) -> bool {
    c == '\u{207F}' || c == '\u{0358}'
}

/// Check if a character can appear inside a romanized syllable.
///
/// Accepts ASCII letters, tone diacritics, nasal markers, and precomposed
/// letters that canonically decompose into an ASCII letter plus tone
/// diacritics only (á, Ô, ī, ...).
pub fn is_syllable_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphabetic();
    }
    if is_tone_diacritic(c) || is_nasal_marker(c) {
        return true;
    }
    let mut index = 0;
    let mut valid = true;
    decompose_canonical(c, |d| {
        valid &= if index == 0 {
            d.is_ascii_alphabetic()
        } else {
            is_tone_diacritic(d)
        };
        index += 1;
    });
    valid && index > 1
}
