use std::fs;

use taigi_core::tables::{self, Tables};

pub fn tables_export() {
    print!("{}", tables::default_toml());
}

pub fn tables_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let t = die!(tables::parse_tables_toml(&content), "Error: {}");
    println!(
        "OK: {} initials, {} finals, {} zhuyin vowels",
        t.initials().count(),
        t.finals().count(),
        t.zhuyin().vowels.len()
    );
}

/// Install a custom table document for the rest of the process.
pub fn load_custom_tables(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(Tables::init_custom(content), "Error in {file}: {}");
    tracing::debug!(file, "custom tables installed");
}
