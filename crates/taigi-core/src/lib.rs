pub mod converter;
pub mod orthography;
pub mod syllable;
pub mod tables;
pub mod tone;
pub mod unicode;
pub mod zhuyin;
