use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process;

use taigi_core::converter::{self, write_result, ConvertError};
use taigi_core::orthography::{Orthography, Romanization};
use taigi_core::zhuyin::TailoTpsConverter;

/// Where the text to convert comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum InputSource<'a> {
    Text(&'a str),
    File(&'a str),
    Stdin,
}

/// Positional text wins, then `--input`, then piped stdin.
pub fn select_source<'a>(
    text: Option<&'a str>,
    input: Option<&'a str>,
    stdin_is_terminal: bool,
) -> Option<InputSource<'a>> {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        return Some(InputSource::Text(text));
    }
    if let Some(file) = input.filter(|f| !f.is_empty()) {
        return Some(InputSource::File(file));
    }
    (!stdin_is_terminal).then_some(InputSource::Stdin)
}

/// Resolve and read the input text. `None` means nothing was given.
pub fn read_input(text: Option<&str>, input: Option<&str>) -> Option<String> {
    let source = select_source(text, input, io::stdin().is_terminal())?;
    let text = match source {
        InputSource::Text(text) => text.to_string(),
        InputSource::File(file) => {
            if !Path::new(file).is_file() {
                eprintln!("Error: input file not found: {file}");
                process::exit(1);
            }
            die!(fs::read_to_string(file), "Error reading {file}: {}")
        }
        InputSource::Stdin => {
            let mut buf = String::new();
            die!(io::stdin().read_to_string(&mut buf), "Error reading stdin: {}");
            buf
        }
    };
    Some(text)
}

/// Print the result, or write it to `output` and say where it went.
pub fn emit(result: &str, output: Option<&str>) -> Result<(), ConvertError> {
    match output.filter(|o| !o.is_empty()) {
        Some(path) => {
            write_result(Path::new(path), result)?;
            println!("Result written to {path}");
        }
        None => println!("{result}"),
    }
    Ok(())
}

pub fn convert_cmd(text: &str, source: &str, target: &str, output: Option<&str>) {
    let source: Orthography = die!(source.parse(), "Error: {}");
    let target: Orthography = die!(target.parse(), "Error: {}");
    let result = die!(converter::convert(text, source, target), "Error: {}");
    die!(emit(&result, output), "Error writing output: {}");
}

pub fn tone_number_cmd(text: &str, output: Option<&str>) {
    let result = converter::to_tone_number(text);
    die!(emit(&result, output), "Error writing output: {}");
}

pub fn tone_mark_cmd(text: &str, system: &str, output: Option<&str>) {
    let system: Romanization = die!(system.parse(), "Error: {}");
    let result = converter::to_tone_mark(text, system);
    die!(emit(&result, output), "Error writing output: {}");
}

/// Convert a numbered Tâi-lô file to TPS and report the result.
pub fn legacy(input: &str, output: &str, safe: bool) -> Result<String, ConvertError> {
    TailoTpsConverter::new(safe).convert_file(Path::new(input), Path::new(output))
}

pub fn legacy_cmd(input: &str, output: &str, safe: bool) {
    if !Path::new(input).is_file() {
        eprintln!("Error: input file not found: {input}");
        process::exit(1);
    }
    let result = die!(legacy(input, output, safe), "Error: {}");
    println!("Conversion success!\nResult to {output}:\n{result}");
}
