//! Text-level conversion between orthographies.
//!
//! Free text is scanned for syllable runs (Latin letters, tone diacritics,
//! nasal markers, optionally one trailing tone digit). Each run is parsed and
//! reassembled in the target orthography with its letter case restored.
//! Runs that fail to parse, and everything between runs, are copied through
//! unchanged.

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, debug_span};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::orthography::{Orthography, Romanization};
use crate::syllable::parse_syllable;
use crate::tone::{default_tone, strip_tone_mark};
use crate::unicode::{is_nasal_marker, is_syllable_char};
use crate::zhuyin::TailoTpsConverter;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("unsupported system: {0}")]
    UnsupportedSystem(String),
    #[error("zhuyin is not supported as a conversion source")]
    UnsupportedDirection,
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convert `text` from one orthography to another.
///
/// Identity when `source == target`. Zhuyin is a target only.
pub fn convert(
    text: &str,
    source: Orthography,
    target: Orthography,
) -> Result<String, ConvertError> {
    let _span = debug_span!("convert", %source, %target, len = text.len()).entered();
    if source == target {
        return Ok(text.to_string());
    }
    if source == Orthography::Zhuyin {
        return Err(ConvertError::UnsupportedDirection);
    }
    match target.romanization() {
        Some(system) => Ok(replace_syllables(text, |token| reassemble(token, system))),
        None => Ok(TailoTpsConverter::default().convert(&to_tone_number(text))),
    }
}

/// Write a conversion result to `path` in one piece.
///
/// Atomic write: write to .tmp then rename, so a failed run never leaves a
/// partial file behind.
pub fn write_result(path: &Path, contents: &str) -> Result<(), ConvertError> {
    let io_err = |source: io::Error| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };
    // `out.txt` stages through `out.txt.tmp`, never a sibling like `out.tmp`.
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&tmp, contents).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

/// String-identifier form of [`convert`].
pub fn convert_str(text: &str, source: &str, target: &str) -> Result<String, ConvertError> {
    convert(text, source.parse()?, target.parse()?)
}

/// Rewrite every tone-marked syllable with a trailing tone digit.
///
/// Syllables that already end in a digit are kept. Unmarked syllables get
/// their default tone (1, or 4 for stop finals); runs that are not
/// syllables at all are copied without a digit.
pub fn to_tone_number(text: &str) -> String {
    let _span = debug_span!("to_tone_number", len = text.len()).entered();
    let chars: Vec<char> = text.nfd().collect();
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !(c.is_alphabetic() || is_nasal_marker(c)) {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && in_run(chars[i]) {
            i += 1;
        }
        let run: String = chars[start..i].iter().collect();

        if chars.get(i).is_some_and(char::is_ascii_digit) {
            out.extend(run.nfc());
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let (bare, tone) = strip_tone_mark(&run);
        out.push_str(&bare);
        match tone {
            Some(tone) => out.push(tone.digit()),
            None => match parse_syllable(&bare) {
                Ok(syllable) => out.push(default_tone(&syllable.rime).digit()),
                Err(e) => debug!(run = %bare, error = %e, "not a syllable, copied without tone"),
            },
        }
    }
    out
}

fn in_run(c: char) -> bool {
    c.is_alphabetic() || is_combining_mark(c) || is_nasal_marker(c)
}

/// Rewrite every numbered syllable (`ka2`) with a tone diacritic.
///
/// Tokens without a trailing digit, or that fail to parse, are kept.
pub fn to_tone_mark(text: &str, system: Romanization) -> String {
    let _span = debug_span!("to_tone_mark", %system, len = text.len()).entered();
    replace_syllables(text, |token| {
        if token.ends_with(|c: char| c.is_ascii_digit()) {
            reassemble(token, system)
        } else {
            None
        }
    })
}

fn reassemble(token: &str, system: Romanization) -> Option<String> {
    match parse_syllable(token) {
        Ok(syllable) => {
            let case = CasePattern::detect(token);
            Some(case.apply(&system.assemble(&syllable)))
        }
        Err(e) => {
            debug!(token, error = %e, "passing through");
            None
        }
    }
}

/// Call `f` on every syllable token in `text`, substituting its result.
/// `None` keeps the token as written.
fn replace_syllables(text: &str, mut f: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(is_syllable_char) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let mut end = tail.find(|c| !is_syllable_char(c)).unwrap_or(tail.len());
        if tail[end..].starts_with(|c: char| c.is_ascii_digit()) {
            end += 1;
        }
        let token = &tail[..end];
        match f(token) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(token),
        }
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

/// Letter case of a syllable token, judged on its alphabetic characters.
/// Nasal markers (`ⁿ`) are caseless here and never count as lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePattern {
    Lower,
    Title,
    Upper,
}

impl CasePattern {
    pub fn detect(token: &str) -> Self {
        let mut letters = token
            .chars()
            .filter(|&c| c.is_alphabetic() && !is_nasal_marker(c))
            .peekable();
        let Some(&first) = letters.peek() else {
            return CasePattern::Lower;
        };
        let (mut upper, mut lower) = (false, false);
        for c in letters {
            upper |= c.is_uppercase();
            lower |= c.is_lowercase();
        }
        if upper && !lower {
            CasePattern::Upper
        } else if first.is_uppercase() {
            CasePattern::Title
        } else {
            CasePattern::Lower
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            CasePattern::Lower => text.to_string(),
            CasePattern::Upper => text.to_uppercase(),
            CasePattern::Title => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}
