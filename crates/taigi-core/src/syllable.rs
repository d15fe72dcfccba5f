//! Syllable model and parser.

use crate::tables::Tables;
use crate::tone::{default_tone, strip_tone_mark, Tone};

/// One parsed syllable in canonical (Tâi-lô) spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Syllable {
    /// Onset consonant(s); empty for vowel-initial syllables.
    pub initial: String,
    /// The syllable final (vowel nucleus plus coda).
    pub rime: String,
    pub tone: Tone,
}

impl Syllable {
    pub fn new(initial: impl Into<String>, rime: impl Into<String>, tone: Tone) -> Self {
        Self {
            initial: initial.into(),
            rime: rime.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse syllable: {0}")]
pub struct ParseError(pub String);

/// Parse a single token in any supported romanization into a [`Syllable`].
///
/// Accepts diacritic or numeric tones, any letter case, and Pe̍h-ōe-jī
/// spellings. Fails when no initial/final split fits the inventory.
pub fn parse_syllable(token: &str) -> Result<Syllable, ParseError> {
    let (bare, tone) = strip_tone_mark(token);
    let canonical = to_canonical_spelling(&bare.to_lowercase());
    let (initial, rime) =
        split_initial_final(&canonical).ok_or_else(|| ParseError(token.to_string()))?;
    let tone = tone.unwrap_or_else(|| default_tone(rime));
    Ok(Syllable::new(initial, rime, tone))
}

/// Apply the Pe̍h-ōe-jī → Tâi-lô spelling rewrites, in table order.
pub fn to_canonical_spelling(s: &str) -> String {
    Tables::global()
        .canonical_rewrites()
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
}

/// Shortest initial first; the tables guarantee at most one split succeeds.
fn split_initial_final(s: &str) -> Option<(&str, &str)> {
    let tables = Tables::global();
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .map(|i| s.split_at(i))
        .find(|(initial, rime)| tables.is_initial(initial) && tables.is_final(rime))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(n: u8) -> Tone {
        Tone::new(n).unwrap()
    }

    fn parts(token: &str) -> (String, String, u8) {
        let s = parse_syllable(token).unwrap();
        (s.initial, s.rime, s.tone.number())
    }

    #[test]
    fn test_parse_marked() {
        assert_eq!(parse_syllable("tâi").unwrap(), Syllable::new("t", "ai", tone(5)));
        assert_eq!(parse_syllable("lô").unwrap(), Syllable::new("l", "o", tone(5)));
    }

    #[test]
    fn test_parse_numbered() {
        assert_eq!(parts("tai5"), ("t".into(), "ai".into(), 5));
        assert_eq!(parts("pak4"), ("p".into(), "ak".into(), 4));
    }

    #[test]
    fn test_parse_unmarked_defaults() {
        assert_eq!(parts("tai"), ("t".into(), "ai".into(), 1));
        assert_eq!(parts("pak"), ("p".into(), "ak".into(), 4));
        assert_eq!(parts("sannh"), ("s".into(), "annh".into(), 4));
    }

    #[test]
    fn test_parse_vowel_initial() {
        assert_eq!(parts("a"), ("".into(), "a".into(), 1));
        assert_eq!(parts("ōo"), ("".into(), "oo".into(), 7));
    }

    #[test]
    fn test_parse_syllabic_nasals() {
        assert_eq!(parts("ng"), ("".into(), "ng".into(), 1));
        assert_eq!(parts("m̄"), ("".into(), "m".into(), 7));
        assert_eq!(parts("hng5"), ("h".into(), "ng".into(), 5));
    }

    #[test]
    fn test_parse_poj_spellings() {
        assert_eq!(parts("chhiū"), ("tsh".into(), "iu".into(), 7));
        assert_eq!(parts("chiáⁿ"), ("ts".into(), "iann".into(), 2));
        assert_eq!(parts("kô͘"), ("k".into(), "oo".into(), 5));
        assert_eq!(parts("hoa"), ("h".into(), "ua".into(), 1));
        assert_eq!(parts("seng"), ("s".into(), "ing".into(), 1));
        assert_eq!(parts("lek8"), ("l".into(), "ik".into(), 8));
        assert_eq!(parts("ă"), ("".into(), "a".into(), 9));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parts("Tâi"), ("t".into(), "ai".into(), 5));
        assert_eq!(parts("TSHIŪ"), ("tsh".into(), "iu".into(), 7));
    }

    #[test]
    fn test_parse_failure() {
        let err = parse_syllable("xyz").unwrap_err();
        assert_eq!(err, ParseError("xyz".to_string()));
        assert_eq!(err.to_string(), "cannot parse syllable: xyz");
        assert!(parse_syllable("").is_err());
        assert!(parse_syllable("ǎ").is_err());
    }

    #[test]
    fn test_canonical_spelling() {
        assert_eq!(to_canonical_spelling("chhoa"), "tshua");
        assert_eq!(to_canonical_spelling("kou"), "koo");
        assert_eq!(to_canonical_spelling("hoe"), "hue");
        assert_eq!(to_canonical_spelling("tai"), "tai");
    }
}
