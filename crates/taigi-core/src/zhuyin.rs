//! Numbered-tone Tâi-lô → Zhuyin (TPS) transliteration.
//!
//! A greedy, table-driven prefix scan: punctuation prefixes, one initial,
//! as many vowel clusters as match, then one tone suffix. Whatever is left
//! over is kept verbatim.

use std::fs;
use std::path::Path;

use tracing::{debug, debug_span};

use crate::converter::{write_result, ConvertError};
use crate::tables::Tables;

const BILABIAL_NASAL: &str = "\u{3107}"; // ㄇ
const SYLLABIC_M: &str = "\u{31AC}"; // ㆬ
const BUZZED_NG: &str = "\u{3125}"; // ㄥ
const SYLLABIC_NG: &str = "\u{31AD}"; // ㆭ

/// Match the first `(latin, glyph)` entry whose latin spelling prefixes
/// `rest`, returning the glyph and the unmatched tail.
fn match_prefix<'a, 't>(
    table: &'t [(String, String)],
    rest: &'a str,
) -> Option<(&'t str, &'a str)> {
    table.iter().find_map(|(latin, glyph)| {
        rest.strip_prefix(latin.as_str())
            .map(|tail| (glyph.as_str(), tail))
    })
}

/// Transliterate one numbered-tone token (e.g. `"kap8"`).
///
/// Punctuation is not substituted here; see [`substitute_punctuation`].
pub fn to_zhuyin(token: &str, encode_safe: bool) -> String {
    let tables = Tables::global().zhuyin();
    let mut rest = token;

    let mut punctuation = String::new();
    while let Some(prefix) = tables
        .punctuation_prefixes
        .iter()
        .find(|p| rest.starts_with(p.as_str()))
    {
        punctuation.push_str(prefix);
        rest = &rest[prefix.len()..];
    }

    let mut consonant = "";
    if let Some((glyph, tail)) = match_prefix(&tables.initials, rest) {
        consonant = glyph;
        rest = tail;
    }

    let mut vowel = String::new();
    while let Some((glyph, tail)) = match_prefix(&tables.vowels, rest) {
        vowel.push_str(glyph);
        rest = tail;
    }

    let tone_table = if encode_safe {
        &tables.tones_encode_safe
    } else {
        &tables.tones
    };
    let mut tone = "";
    if let Some((glyph, tail)) = match_prefix(tone_table, rest) {
        tone = glyph;
        rest = tail;
    }

    if vowel.is_empty() && consonant == BILABIAL_NASAL {
        vowel.push_str(SYLLABIC_M);
    }
    if vowel == BUZZED_NG && consonant.is_empty() {
        vowel = SYLLABIC_NG.to_string();
    }

    let mut out = punctuation;
    out.push_str(consonant);
    out.push_str(&vowel);
    out.push_str(tone);
    out.push_str(rest);
    out
}

/// Replace Latin punctuation with full-width TPS glyphs across a whole line.
///
/// Repeatedly applies the first pair whose Latin form still occurs, until
/// none does.
pub fn substitute_punctuation(line: &str) -> String {
    let pairs = &Tables::global().zhuyin().punctuation;
    let mut result = line.to_string();
    while let Some((glyph, latin)) = pairs
        .iter()
        .find(|(_, latin)| result.contains(latin.as_str()))
    {
        result = result.replace(latin.as_str(), glyph);
    }
    result
}

/// Line-oriented TPS converter over numbered-tone text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailoTpsConverter {
    /// Use plain glyph substitutes instead of combining marks.
    pub encode_safe: bool,
}

impl TailoTpsConverter {
    pub fn new(encode_safe: bool) -> Self {
        Self { encode_safe }
    }

    /// Convert numbered-tone text line by line. Tokens are split on single
    /// spaces and concatenated; the tone glyph carries any spacing.
    pub fn convert(&self, text: &str) -> String {
        let _span = debug_span!("tps_convert", encode_safe = self.encode_safe).entered();
        let lines: Vec<String> = text
            .lines()
            .map(|line| {
                let glyphs: String = line
                    .split(' ')
                    .map(|token| to_zhuyin(token, self.encode_safe))
                    .collect();
                substitute_punctuation(&glyphs)
            })
            .collect();
        debug!(lines = lines.len(), "converted");
        lines.join("\n")
    }

    /// Read `input`, convert it, and write the result to `output`.
    ///
    /// The output is written to `<output>.tmp` and renamed into place,
    /// so a failed run never leaves a partial file at `output`.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<String, ConvertError> {
        let text = fs::read_to_string(input).map_err(|source| ConvertError::Io {
            path: input.to_path_buf(),
            source,
        })?;
        let result = self.convert(&text);
        write_result(output, &result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(token: &str) -> String {
        to_zhuyin(token, false)
    }

    #[test]
    fn test_simple_syllables() {
        assert_eq!(z("pa1"), "ㄅㄚ ");
        assert_eq!(z("pha1"), "ㄆㄚ ");
        assert_eq!(z("tshi1"), "ㄑㄧ ");
        assert_eq!(z("ann1"), "ㆩ ");
    }

    #[test]
    fn test_tones() {
        assert_eq!(z("ka2"), "ㄍㄚˋ");
        assert_eq!(z("ka3"), "ㄍㄚ˪");
        assert_eq!(z("ka5"), "ㄍㄚˊ");
        assert_eq!(z("ka7"), "ㄍㄚ˫");
        assert_eq!(z("ka9"), "ㄍㄚˆ");
    }

    #[test]
    fn test_stop_tones() {
        assert_eq!(z("kap4"), "ㄍㄚㆴ");
        assert_eq!(z("kat4"), "ㄍㄚㆵ");
        assert_eq!(z("kak4"), "ㄍㄚㆶ");
        assert_eq!(z("kah4"), "ㄍㄚㆷ");
        assert_eq!(z("kap8"), "ㄍㄚㆴ\u{0307}");
    }

    #[test]
    fn test_encode_safe_uses_plain_dot() {
        assert_eq!(to_zhuyin("kap8", true), "ㄍㄚㆴ\u{02D9}");
        assert_eq!(to_zhuyin("ka2", true), "ㄍㄚˋ");
    }

    #[test]
    fn test_syllabic_nasal_fixups() {
        assert_eq!(z("m1"), "ㄇㆬ ");
        assert_eq!(z("ng1"), "ㄫ ");
    }

    #[test]
    fn test_unmatched_remainder_kept() {
        assert_eq!(z("ka1,"), "ㄍㄚ ,");
        assert_eq!(z("xyz"), "xyz");
        assert_eq!(z(""), "");
    }

    #[test]
    fn test_leading_punctuation() {
        assert_eq!(z("\"ka1"), "\"ㄍㄚ ");
        assert_eq!(z("--ka2"), "--ㄍㄚˋ");
    }

    #[test]
    fn test_substitute_punctuation() {
        assert_eq!(substitute_punctuation("ㄍㄚ ,"), "ㄍㄚ ，");
        assert_eq!(substitute_punctuation("ㄍㄚ. ㄅㄚ?"), "ㄍㄚ。ㄅㄚ？");
        assert_eq!(substitute_punctuation("\"ㄍㄚ"), "「ㄍㄚ");
    }

    #[test]
    fn test_converter_lines() {
        let c = TailoTpsConverter::default();
        assert_eq!(c.convert("tiau1 su5"), "ㄉㄧㄠ ㄙㄨˊ");
        assert_eq!(c.convert("ka1,\r\npa2\n"), "ㄍㄚ ，\nㄅㄚˋ");
        assert_eq!(c.convert(""), "");
    }

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out").join("result.txt");
        fs::write(&input, "tiau1 su5").unwrap();

        let result = TailoTpsConverter::new(true)
            .convert_file(&input, &output)
            .unwrap();
        assert_eq!(result, "ㄉㄧㄠ ㄙㄨˊ");
        assert_eq!(fs::read_to_string(&output).unwrap(), result);
        assert!(!output.with_extension("tmp").exists());
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = TailoTpsConverter::default()
            .convert_file(&missing, &dir.path().join("out.txt"))
            .unwrap_err();
        match err {
            ConvertError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
