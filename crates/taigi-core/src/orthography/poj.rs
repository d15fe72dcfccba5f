//! Pe̍h-ōe-jī assembly.
//!
//! The canonical spelling is first rewritten into POJ surface spelling
//! (`ts` → `ch`, `nn` → `ⁿ`, `oo` → `o͘`, ...), then the tone mark is placed
//! by the rules in [`mark_position`], which follow the traditional POJ
//! stress conventions for diphthongs and triphthongs.

use unicode_normalization::UnicodeNormalization;

use super::Romanization;
use crate::syllable::Syllable;
use crate::tables::Tables;
use crate::tone::tone_mark;

const VOWELS: &str = "aeiou";
const CODA_STARTS: &str = "nmgptkh\u{207F}";

/// Render a syllable in Pe̍h-ōe-jī.
pub fn to_poj(syllable: &Syllable) -> String {
    let tables = Tables::global();
    let initial = tables
        .poj_initial(&syllable.initial)
        .unwrap_or(syllable.initial.as_str());
    let rime = tables
        .poj_final_rewrites()
        .iter()
        .fold(syllable.rime.clone(), |acc, (from, to)| {
            acc.replace(from.as_str(), to)
        });

    let rime = match tone_mark(Romanization::Poj, syllable.tone) {
        Some(mark) => match mark_position(&rime) {
            Some(at) => {
                let mut marked = String::with_capacity(rime.len() + mark.len_utf8());
                marked.push_str(&rime[..at]);
                marked.push(mark);
                marked.push_str(&rime[at..]);
                marked
            }
            None => rime,
        },
        None => rime,
    };
    format!("{initial}{rime}").nfc().collect()
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Byte offset in a POJ-spelled final at which the tone mark is inserted.
/// Rules are tried in order; the first that applies decides.
fn mark_position(rime: &str) -> Option<usize> {
    // o͘: between the o and its dot
    if let Some(i) = rime.find("o\u{0358}") {
        return Some(i + 1);
    }

    if rime.contains("iau") || rime.contains("oai") {
        return rime.find('a').map(|i| i + 1);
    }

    let chars: Vec<char> = rime.chars().collect();
    if let Some(start) = chars
        .windows(2)
        .position(|pair| is_vowel(pair[0]) && is_vowel(pair[1]))
    {
        let (first, second) = (chars[start], chars[start + 1]);
        let target = if first == 'i' {
            second
        } else if second == 'i' {
            first
        } else if chars.len() == 2 {
            first
        } else if rime.ends_with('\u{207F}') && !rime.ends_with("h\u{207F}") {
            first
        } else {
            match chars.get(start + 2) {
                Some(&c) if CODA_STARTS.contains(c) => second,
                _ => first,
            }
        };
        // The first occurrence of the target letter, which need not be
        // inside the pair.
        return rime.find(target).map(|i| i + target.len_utf8());
    }

    if let Some(i) = rime.find(is_vowel) {
        return Some(i + 1);
    }
    if rime.contains("ng") {
        return rime.find('n').map(|i| i + 1);
    }
    rime.find('m').map(|i| i + 1)
}
