//! Tone codes and the tone-mark codec.
//!
//! Converts between combining tone diacritics and numeric tone codes, and
//! infers the implicit tone of an unmarked syllable (1, or 4 for stop finals).

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::orthography::Romanization;
use crate::tables::Tables;

/// A Taiwanese tone code: 1–9 excluding 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tone(u8);

impl Tone {
    pub const FIRST: Tone = Tone(1);
    pub const FOURTH: Tone = Tone(4);

    pub fn new(n: u8) -> Option<Tone> {
        matches!(n, 1..=5 | 7..=9).then_some(Tone(n))
    }

    /// Parse an ASCII tone digit.
    pub fn from_digit(c: char) -> Option<Tone> {
        c.to_digit(10).and_then(|d| Tone::new(d as u8))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn digit(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remove the tone from a syllable token.
///
/// The first recognized combining diacritic wins; otherwise a trailing tone
/// digit is taken as an already-numbered tone. Returns the NFC bare syllable
/// and the tone, or `None` when the token carries neither (the caller infers
/// the default).
pub fn strip_tone_mark(token: &str) -> (String, Option<Tone>) {
    let tables = Tables::global();
    let decomposed: String = token.nfd().collect();

    let marked = decomposed
        .char_indices()
        .find_map(|(i, c)| tables.tone_for_mark(c).map(|tone| (i, c, tone)));
    if let Some((pos, mark, tone)) = marked {
        let mut bare = String::with_capacity(decomposed.len());
        bare.push_str(&decomposed[..pos]);
        bare.push_str(&decomposed[pos + mark.len_utf8()..]);
        return (bare.nfc().collect(), Some(tone));
    }

    if let Some(tone) = decomposed.chars().last().and_then(Tone::from_digit) {
        let bare = &decomposed[..decomposed.len() - 1];
        return (bare.nfc().collect(), Some(tone));
    }

    (token.nfc().collect(), None)
}

/// True if the final, ignoring nasalization, ends in p/t/k/h.
pub fn is_stop_final(rime: &str) -> bool {
    let cleaned = rime.to_lowercase().replace("nn", "").replace('ⁿ', "");
    cleaned.ends_with(['p', 't', 'k', 'h'])
}

/// The tone an unmarked syllable with this final carries.
pub fn default_tone(rime: &str) -> Tone {
    if is_stop_final(rime) {
        Tone::FOURTH
    } else {
        Tone::FIRST
    }
}

/// The combining diacritic for `tone` in the given romanization, if any.
pub fn tone_mark(system: Romanization, tone: Tone) -> Option<char> {
    Tables::global().tone_mark(system, tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_rejects_six_and_zero() {
        assert_eq!(Tone::new(6), None);
        assert_eq!(Tone::new(0), None);
        assert_eq!(Tone::new(10), None);
        assert_eq!(Tone::from_digit('6'), None);
        assert_eq!(Tone::from_digit('x'), None);
        assert_eq!(Tone::from_digit('8').map(Tone::number), Some(8));
        assert_eq!(Tone::FOURTH.digit(), '4');
    }

    #[test]
    fn test_strip_each_diacritic() {
        let cases = [
            ("á", 2),
            ("à", 3),
            ("â", 5),
            ("ā", 7),
            ("a\u{030D}", 8),
            ("a\u{030B}", 9),
            ("ă", 9),
        ];
        for (token, tone) in cases {
            let (bare, got) = strip_tone_mark(token);
            assert_eq!(bare, "a", "bare syllable for {token}");
            assert_eq!(got.map(Tone::number), Some(tone), "tone for {token}");
        }
    }

    #[test]
    fn test_strip_no_mark() {
        assert_eq!(strip_tone_mark("a"), ("a".to_string(), None));
    }

    #[test]
    fn test_strip_caron_is_not_a_tone() {
        let (bare, tone) = strip_tone_mark("ǎ");
        assert_eq!(bare, "ǎ");
        assert_eq!(tone, None);
    }

    #[test]
    fn test_strip_tone_number_suffix() {
        let (bare, tone) = strip_tone_mark("ka2");
        assert_eq!(bare, "ka");
        assert_eq!(tone, Some(Tone::new(2).unwrap()));
    }

    #[test]
    fn test_strip_invalid_digit_left_alone() {
        assert_eq!(strip_tone_mark("ka6"), ("ka6".to_string(), None));
    }

    #[test]
    fn test_strip_multi_char_syllable() {
        let (bare, tone) = strip_tone_mark("tshiū");
        assert_eq!(bare, "tshiu");
        assert_eq!(tone.map(Tone::number), Some(7));
    }

    #[test]
    fn test_strip_keeps_dot_above_right() {
        let (bare, tone) = strip_tone_mark("kô\u{0358}");
        assert_eq!(bare, "ko\u{0358}");
        assert_eq!(tone.map(Tone::number), Some(5));
    }

    #[test]
    fn test_stop_finals() {
        assert!(is_stop_final("ap"));
        assert!(is_stop_final("at"));
        assert!(is_stop_final("ak"));
        assert!(is_stop_final("ah"));
        assert!(is_stop_final("annh"));
        assert!(is_stop_final("aⁿh"));
        assert!(!is_stop_final("a"));
        assert!(!is_stop_final("an"));
        assert!(!is_stop_final("ang"));
        assert!(!is_stop_final("ann"));
    }

    #[test]
    fn test_default_tone() {
        assert_eq!(default_tone("ah"), Tone::FOURTH);
        assert_eq!(default_tone("iunnh"), Tone::FOURTH);
        assert_eq!(default_tone("a"), Tone::FIRST);
        assert_eq!(default_tone("ng"), Tone::FIRST);
    }

    #[test]
    fn test_ninth_tone_marks_differ() {
        let ninth = Tone::new(9).unwrap();
        assert_eq!(tone_mark(Romanization::Tl, ninth), Some('\u{030B}'));
        assert_eq!(tone_mark(Romanization::Poj, ninth), Some('\u{0306}'));
        assert_eq!(tone_mark(Romanization::Tl, Tone::FIRST), None);
        assert_eq!(tone_mark(Romanization::Poj, Tone::FOURTH), None);
    }
}
