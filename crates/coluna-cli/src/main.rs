mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use coluna_core::load::LoadOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coluna",
    version,
    about = "Find the name, phone and CPF/CNPJ columns of a Brazilian spreadsheet"
)]
struct Cli {
    /// Log detector signals to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How the input spreadsheet is read.
#[derive(Args)]
struct LoadArgs {
    /// Path to a CSV, XLSX, XLS or ODS file
    input_file: PathBuf,

    /// Workbook sheet to read (default: first sheet)
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Keep every CSV cell as text (preserves leading zeros in bare CPFs)
    #[arg(long)]
    all_text: bool,

    /// CSV delimiter (default: sniffed from the header line)
    #[arg(long, value_name = "CHAR", value_parser = parse_delimiter)]
    delimiter: Option<u8>,
}

impl LoadArgs {
    fn options(&self) -> LoadOptions {
        LoadOptions {
            sheet: self.sheet.clone(),
            all_text: self.all_text,
            delimiter: self.delimiter,
        }
    }
}

/// How the detectors are tuned.
#[derive(Args)]
struct DetectArgs {
    /// Detector config JSON (weights, limits, bonuses)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Given-name dictionary, one name per line (replaces the built-in list)
    #[arg(long, value_name = "FILE")]
    names: Option<PathBuf>,

    /// Draw the entity-recognition sample with this seed instead of taking the head
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every column and pick the name, phone and document columns
    Detect {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        detect: DetectArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show rows, columns, inferred kinds and which columns are eligible
    Inspect {
        #[command(flatten)]
        load: LoadArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Detect the columns, then list normalized contacts row by row
    Extract {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        detect: DetectArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write contacts to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Classify and validate CPF/CNPJ values
    Document {
        /// Values to check, punctuation allowed
        #[arg(required = true)]
        values: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Normalize Brazilian phone numbers
    Phone {
        /// Values to normalize
        #[arg(required = true)]
        values: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate detector configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as JSON (defaults, or FILE merged over them)
    Show {
        /// Path to config JSON
        file: Option<PathBuf>,
    },
    /// Validate a config file
    Validate {
        /// Path to config JSON
        file: PathBuf,
    },
    /// Print the config fields with descriptions and defaults
    Schema,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
        },
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("coluna_core=debug,coluna=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Detect {
            load,
            detect,
            output,
        } => commands::detect::run(&load.input_file, &load.options(), &detect, &output),
        Commands::Inspect { load, output } => {
            commands::inspect::run(&load.input_file, &load.options(), &output)
        }
        Commands::Extract {
            load,
            detect,
            output,
            out,
        } => commands::extract::run(&load.input_file, &load.options(), &detect, &output, out),
        Commands::Document { values, output } => commands::check::documents(&values, &output),
        Commands::Phone { values, output } => commands::check::phones(&values, &output),
        Commands::Config { action } => match action {
            ConfigAction::Show { file } => commands::config::show(file.as_deref()),
            ConfigAction::Validate { file } => commands::config::validate(&file),
            ConfigAction::Schema => commands::config::schema(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
