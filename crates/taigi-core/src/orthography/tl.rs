//! Tâi-lô assembly.

use unicode_normalization::UnicodeNormalization;

use super::Romanization;
use crate::syllable::Syllable;
use crate::tone::tone_mark;

/// `(trigger, anchor, offset)`: if the final contains `trigger`, the mark is
/// inserted `offset` bytes into the first occurrence of `anchor`.
/// First match wins.
const PLACEMENT: &[(&str, &str, usize)] = &[
    ("a", "a", 1),
    ("oo", "oo", 1),
    ("ere", "ere", 3),
    ("e", "e", 1),
    ("o", "o", 1),
    ("ui", "i", 1),
    ("iu", "u", 1),
    ("iri", "iri", 3),
    ("i", "i", 1),
    ("u", "u", 1),
    ("ng", "ng", 1),
    ("m", "m", 1),
];

/// Render a syllable in Tâi-lô.
pub fn to_tl(syllable: &Syllable) -> String {
    let rime = match tone_mark(Romanization::Tl, syllable.tone) {
        Some(mark) => place_mark(&syllable.rime, mark),
        None => syllable.rime.clone(),
    };
    format!("{}{}", syllable.initial, rime).nfc().collect()
}

fn place_mark(rime: &str, mark: char) -> String {
    for &(trigger, anchor, offset) in PLACEMENT {
        if !rime.contains(trigger) {
            continue;
        }
        if let Some(pos) = rime.find(anchor) {
            let at = pos + offset;
            let mut marked = String::with_capacity(rime.len() + mark.len_utf8());
            marked.push_str(&rime[..at]);
            marked.push(mark);
            marked.push_str(&rime[at..]);
            return marked;
        }
    }
    rime.to_string()
}
