
use super::*;

fn tl_to_poj(text: &str) -> String {
    convert(text, Orthography::Tl, Orthography::Poj).unwrap()
}

fn poj_to_tl(text: &str) -> String {
    convert(text, Orthography::Poj, Orthography::Tl).unwrap()
}
