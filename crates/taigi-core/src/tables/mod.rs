//! Syllable lookup tables, loaded from TOML.
//!
//! - `Tables::init_custom(toml_content)` installs a custom document before first use
//!   (atomic with respect to `global()`: whichever runs first wins)
//! - `Tables::global()` returns `&'static Tables` (lazy-init singleton)
//! - Defaults are embedded via `include_str!("default_tables.toml")`
//!
//! Tables are never mutated after loading.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;

use crate::orthography::Romanization;
use crate::tone::Tone;

pub const DEFAULT_TABLES_TOML: &str = include_str!("default_tables.toml");

static INSTANCE: OnceLock<Tables> = OnceLock::new();

/// Returns the embedded default table document.
pub fn default_toml() -> &'static str {
    DEFAULT_TABLES_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("{0} is empty")]
    Empty(&'static str),
    #[error("empty pattern in {0}")]
    EmptyPattern(&'static str),
    #[error("invalid tone key in tone_marks.{table}: {key}")]
    InvalidToneKey { table: &'static str, key: String },
    #[error("tone_marks.{table}.{tone} must be a single combining mark, got {mark:?}")]
    InvalidMark {
        table: &'static str,
        tone: Tone,
        mark: String,
    },
    #[error("mark {mark:?} is used for both tone {first} and tone {second}")]
    ConflictingMark { mark: char, first: Tone, second: Tone },
    #[error("syllable {syllable:?} splits both as {first:?} and {second:?}")]
    AmbiguousSplit {
        syllable: String,
        first: (String, String),
        second: (String, String),
    },
    #[error("zhuyin.punctuation glyph {glyph:?} contains {ch:?}, which is itself rewritten")]
    SelfFeedingPunctuation { glyph: String, ch: char },
    #[error("syllable tables already initialized")]
    AlreadyInitialized,
}

#[derive(Deserialize)]
struct TablesDoc {
    inventory: InventoryDoc,
    canonical: CanonicalDoc,
    tone_marks: ToneMarksDoc,
    poj: PojDoc,
    zhuyin: ZhuyinTables,
}

#[derive(Deserialize)]
struct InventoryDoc {
    initials: Vec<String>,
    finals: Vec<String>,
}

#[derive(Deserialize)]
struct CanonicalDoc {
    rewrites: Vec<(String, String)>,
}

#[derive(Deserialize)]
struct ToneMarksDoc {
    tl: BTreeMap<String, String>,
    poj: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct PojDoc {
    initials: HashMap<String, String>,
    final_rewrites: Vec<(String, String)>,
}

/// Ordered `(latin, glyph)` tables for the Zhuyin transliterator.
#[derive(Debug, Clone, Deserialize)]
pub struct ZhuyinTables {
    pub punctuation_prefixes: Vec<String>,
    pub initials: Vec<(String, String)>,
    pub vowels: Vec<(String, String)>,
    pub tones: Vec<(String, String)>,
    pub tones_encode_safe: Vec<(String, String)>,
    /// `(glyph, latin)` pairs, applied line-wide.
    pub punctuation: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct Tables {
    initials: HashSet<String>,
    finals: HashSet<String>,
    canonical_rewrites: Vec<(String, String)>,
    tl_marks: BTreeMap<Tone, char>,
    poj_marks: BTreeMap<Tone, char>,
    mark_tones: HashMap<char, Tone>,
    poj_initials: HashMap<String, String>,
    poj_final_rewrites: Vec<(String, String)>,
    zhuyin: ZhuyinTables,
}

impl Tables {
    /// Install a custom table document. Fails once `global()` has loaded
    /// the defaults or another document was installed.
    pub fn init_custom(toml_content: String) -> Result<(), TableError> {
        let tables = parse_tables_toml(&toml_content)?;
        let (initials, finals) = (tables.initials.len(), tables.finals.len());
        INSTANCE
            .set(tables)
            .map_err(|_| TableError::AlreadyInitialized)?;
        debug!(initials, finals, custom = true, "syllable tables loaded");
        Ok(())
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static Tables {
        INSTANCE.get_or_init(|| {
            let tables =
                parse_tables_toml(DEFAULT_TABLES_TOML).expect("default table TOML must be valid");
            debug!(
                initials = tables.initials.len(),
                finals = tables.finals.len(),
                custom = false,
                "syllable tables loaded"
            );
            tables
        })
    }

    pub fn is_initial(&self, s: &str) -> bool {
        self.initials.contains(s)
    }

    pub fn is_final(&self, s: &str) -> bool {
        self.finals.contains(s)
    }

    pub fn initials(&self) -> impl Iterator<Item = &str> {
        self.initials.iter().map(String::as_str)
    }

    pub fn finals(&self) -> impl Iterator<Item = &str> {
        self.finals.iter().map(String::as_str)
    }

    pub fn canonical_rewrites(&self) -> &[(String, String)] {
        &self.canonical_rewrites
    }

    /// The tone a recognized combining diacritic stands for.
    pub fn tone_for_mark(&self, c: char) -> Option<Tone> {
        self.mark_tones.get(&c).copied()
    }

    pub fn tone_mark(&self, system: Romanization, tone: Tone) -> Option<char> {
        let marks = match system {
            Romanization::Tl => &self.tl_marks,
            Romanization::Poj => &self.poj_marks,
        };
        marks.get(&tone).copied()
    }

    pub fn poj_initial(&self, initial: &str) -> Option<&str> {
        self.poj_initials.get(initial).map(String::as_str)
    }

    pub fn poj_final_rewrites(&self) -> &[(String, String)] {
        &self.poj_final_rewrites
    }

    pub fn zhuyin(&self) -> &ZhuyinTables {
        &self.zhuyin
    }
}

/// Parse and validate a table document.
pub fn parse_tables_toml(toml_str: &str) -> Result<Tables, TableError> {
    let doc: TablesDoc = toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if doc.inventory.initials.is_empty() {
        return Err(TableError::Empty("inventory.initials"));
    }
    if doc.inventory.finals.is_empty() {
        return Err(TableError::Empty("inventory.finals"));
    }
    if doc.inventory.finals.iter().any(String::is_empty) {
        return Err(TableError::EmptyPattern("inventory.finals"));
    }
    check_unambiguous(&doc.inventory.initials, &doc.inventory.finals)?;

    check_patterns("canonical.rewrites", &doc.canonical.rewrites)?;
    check_patterns("poj.final_rewrites", &doc.poj.final_rewrites)?;
    check_zhuyin(&doc.zhuyin)?;

    let tl_marks = parse_marks("tl", &doc.tone_marks.tl)?;
    let poj_marks = parse_marks("poj", &doc.tone_marks.poj)?;
    let mut mark_tones = HashMap::new();
    for (&tone, &mark) in tl_marks.iter().chain(poj_marks.iter()) {
        if let Some(&first) = mark_tones.get(&mark) {
            if first != tone {
                return Err(TableError::ConflictingMark {
                    mark,
                    first,
                    second: tone,
                });
            }
        }
        mark_tones.insert(mark, tone);
    }

    Ok(Tables {
        initials: doc.inventory.initials.into_iter().collect(),
        finals: doc.inventory.finals.into_iter().collect(),
        canonical_rewrites: doc.canonical.rewrites,
        tl_marks,
        poj_marks,
        mark_tones,
        poj_initials: doc.poj.initials,
        poj_final_rewrites: doc.poj.final_rewrites,
        zhuyin: doc.zhuyin,
    })
}

fn parse_marks(
    table: &'static str,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<Tone, char>, TableError> {
    let mut marks = BTreeMap::new();
    for (key, value) in raw {
        let mut key_chars = key.chars();
        let tone = match (key_chars.next(), key_chars.next()) {
            (Some(c), None) => Tone::from_digit(c),
            _ => None,
        }
        .ok_or_else(|| TableError::InvalidToneKey {
            table,
            key: key.clone(),
        })?;

        let mut value_chars = value.chars();
        match (value_chars.next(), value_chars.next()) {
            (Some(mark), None) if is_combining_mark(mark) => {
                marks.insert(tone, mark);
            }
            _ => {
                return Err(TableError::InvalidMark {
                    table,
                    tone,
                    mark: value.clone(),
                })
            }
        }
    }
    Ok(marks)
}

fn check_patterns(table: &'static str, pairs: &[(String, String)]) -> Result<(), TableError> {
    if pairs.iter().any(|(from, _)| from.is_empty()) {
        return Err(TableError::EmptyPattern(table));
    }
    Ok(())
}

fn check_zhuyin(z: &ZhuyinTables) -> Result<(), TableError> {
    let ordered = [
        ("zhuyin.initials", &z.initials),
        ("zhuyin.vowels", &z.vowels),
        ("zhuyin.tones", &z.tones),
        ("zhuyin.tones_encode_safe", &z.tones_encode_safe),
    ];
    for (name, table) in ordered {
        if table.is_empty() {
            return Err(TableError::Empty(name));
        }
        check_patterns(name, table)?;
    }
    if z.punctuation_prefixes.iter().any(String::is_empty) {
        return Err(TableError::EmptyPattern("zhuyin.punctuation_prefixes"));
    }
    if z.punctuation.iter().any(|(_, latin)| latin.is_empty()) {
        return Err(TableError::EmptyPattern("zhuyin.punctuation"));
    }
    // Each rewrite must remove Latin punctuation characters without adding
    // any back, or the line-level pass never reaches a fixed point.
    let rewritten: HashSet<char> = z
        .punctuation
        .iter()
        .flat_map(|(_, latin)| latin.chars())
        .collect();
    for (glyph, _) in &z.punctuation {
        if let Some(ch) = glyph.chars().find(|c| rewritten.contains(c)) {
            return Err(TableError::SelfFeedingPunctuation {
                glyph: glyph.clone(),
                ch,
            });
        }
    }
    Ok(())
}

/// Every initial+final concatenation must have exactly one valid split, so
/// the parser's scan order never acts as a tie-break.
fn check_unambiguous(initials: &[String], finals: &[String]) -> Result<(), TableError> {
    let initial_set: HashSet<&str> = initials.iter().map(String::as_str).collect();
    let final_set: HashSet<&str> = finals.iter().map(String::as_str).collect();

    for initial in initials {
        for rime in finals {
            let syllable = format!("{initial}{rime}");
            let splits = syllable
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(syllable.len()));
            for at in splits {
                if at == initial.len() {
                    continue;
                }
                let (other_initial, other_rime) = syllable.split_at(at);
                if initial_set.contains(other_initial) && final_set.contains(other_rime) {
                    return Err(TableError::AmbiguousSplit {
                        first: (initial.clone(), rime.clone()),
                        second: (other_initial.to_string(), other_rime.to_string()),
                        syllable: syllable.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
