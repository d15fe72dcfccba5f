use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, Subcommand};

use taigi_cli::commands::{config_ops, convert_ops};
use taigi_cli::trace_init::init_tracing;

const SYSTEMS: [&str; 3] = ["tl", "poj", "zhuyin"];

#[derive(Parser)]
#[command(name = "taigi", about = "Taigi phonetic system converter")]
struct Cli {
    /// Custom syllable table TOML (see `tables-export`)
    #[arg(long, global = true)]
    tables: Option<String>,
    /// Write JSON trace logs to this directory (requires the `trace` feature)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert between TL, POJ, and Zhuyin
    Convert {
        /// Source system
        #[arg(short, long, value_parser = SYSTEMS)]
        source: String,
        /// Target system
        #[arg(short, long, value_parser = SYSTEMS)]
        target: String,
        /// Text to convert
        text: Option<String>,
        /// Input file
        #[arg(short, long)]
        input: Option<String>,
        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert tone marks to tone numbers
    ToneNumber {
        /// Text to convert
        text: Option<String>,
        /// Input file
        #[arg(short, long)]
        input: Option<String>,
        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Convert tone numbers to tone marks
    ToneMark {
        /// Text to convert
        text: Option<String>,
        /// Input file
        #[arg(short, long)]
        input: Option<String>,
        /// Output file
        #[arg(short, long)]
        output: Option<String>,
        /// Tone-mark system
        #[arg(long, default_value = "tl", value_parser = ["tl", "poj"])]
        system: String,
    },
    /// Legacy Tailo-to-Zhuyin file conversion
    Legacy {
        /// Input file
        #[arg(short = 'i')]
        input: String,
        /// Output file
        #[arg(short = 'o', default_value = "output.txt")]
        output: String,
        /// Use unicode-safe TPS encoding
        #[arg(long)]
        safe: bool,
    },
    /// Print the default syllable table TOML
    TablesExport,
    /// Validate a syllable table TOML file
    TablesValidate {
        /// TOML file to validate
        file: String,
    },
}

fn usage_error() -> ! {
    let _ = Cli::command().print_help();
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_dir.as_deref());

    let Some(command) = cli.command else {
        usage_error();
    };
    if let Some(file) = cli.tables.as_deref() {
        config_ops::load_custom_tables(file);
    }

    match command {
        Command::Convert {
            source,
            target,
            text,
            input,
            output,
        } => {
            let text = convert_ops::read_input(text.as_deref(), input.as_deref())
                .unwrap_or_else(|| usage_error());
            convert_ops::convert_cmd(&text, &source, &target, output.as_deref());
        }
        Command::ToneNumber {
            text,
            input,
            output,
        } => {
            let text = convert_ops::read_input(text.as_deref(), input.as_deref())
                .unwrap_or_else(|| usage_error());
            convert_ops::tone_number_cmd(&text, output.as_deref());
        }
        Command::ToneMark {
            text,
            input,
            output,
            system,
        } => {
            let text = convert_ops::read_input(text.as_deref(), input.as_deref())
                .unwrap_or_else(|| usage_error());
            convert_ops::tone_mark_cmd(&text, &system, output.as_deref());
        }
        Command::Legacy {
            input,
            output,
            safe,
        } => convert_ops::legacy_cmd(&input, &output, safe),
        Command::TablesExport => config_ops::tables_export(),
        Command::TablesValidate { file } => config_ops::tables_validate(&file),
    }
}
