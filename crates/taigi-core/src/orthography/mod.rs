//! Orthography identifiers and the TL/POJ syllable assemblers.

mod poj;
mod tl;

use std::fmt;
use std::str::FromStr;

pub use poj::to_poj;
pub use tl::to_tl;

use crate::converter::ConvertError;
use crate::syllable::Syllable;

/// A conversion endpoint. Zhuyin is accepted only as a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orthography {
    Tl,
    Poj,
    Zhuyin,
}

impl Orthography {
    pub fn as_str(self) -> &'static str {
        match self {
            Orthography::Tl => "tl",
            Orthography::Poj => "poj",
            Orthography::Zhuyin => "zhuyin",
        }
    }

    /// The Latin romanization this orthography corresponds to, if any.
    pub fn romanization(self) -> Option<Romanization> {
        match self {
            Orthography::Tl => Some(Romanization::Tl),
            Orthography::Poj => Some(Romanization::Poj),
            Orthography::Zhuyin => None,
        }
    }
}

impl FromStr for Orthography {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tl" => Ok(Orthography::Tl),
            "poj" => Ok(Orthography::Poj),
            "zhuyin" => Ok(Orthography::Zhuyin),
            _ => Err(ConvertError::UnsupportedSystem(s.to_string())),
        }
    }
}

impl fmt::Display for Orthography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diacritic-bearing Latin orthography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Romanization {
    #[default]
    Tl,
    Poj,
}

impl Romanization {
    pub fn assemble(self, syllable: &Syllable) -> String {
        match self {
            Romanization::Tl => to_tl(syllable),
            Romanization::Poj => to_poj(syllable),
        }
    }
}

impl FromStr for Romanization {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Orthography>()?.romanization() {
            Some(r) => Ok(r),
            None => Err(ConvertError::UnsupportedSystem(s.to_string())),
        }
    }
}

impl fmt::Display for Romanization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Romanization::Tl => f.write_str("tl"),
            Romanization::Poj => f.write_str("poj"),
        }
    }
}
