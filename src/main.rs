// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use pivot_translate::app_config::{self, Config, ProcessScope, DEFAULT_CONFIG_FILE};
use pivot_translate::errors::{AppError, HostError};
use pivot_translate::host::{Document, DocumentHost};
use pivot_translate::translation::{DocumentScanner, ScanOptions, SubtypeFilter};

/// CLI Wrapper for ProcessScope to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProcessScope {
    /// Only the output of the most recent command
    Preceding,
    /// The entire document
    All,
}

impl From<CliProcessScope> for ProcessScope {
    fn from(cli_scope: CliProcessScope) -> Self {
        match cli_scope {
            CliProcessScope::Preceding => ProcessScope::Preceding,
            CliProcessScope::All => ProcessScope::All,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the labels of an output document
    Translate(TranslateArgs),

    /// Generate shell completions for pivot-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Output document (JSON) to translate
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Folder holding GLOBALTRANS.ini, LOCALTRANS.ini and category files
    #[arg(short, long, value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// Table subtypes to translate (repeatable, '*' for all)
    #[arg(short, long = "subtype", value_name = "SUBTYPE")]
    subtypes: Vec<String>,

    /// Translate only the preceding command's output or the whole document
    #[arg(short, long, value_enum)]
    process: Option<CliProcessScope>,

    /// Translate only selected items (ignores --process and --subtype)
    #[arg(long)]
    selected_only: bool,

    /// Run as the automatic pass for the item at this index
    #[arg(long, value_name = "INDEX")]
    autoscript_item: Option<usize>,

    /// Where to write the translated document (default: in place)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// pivot-translate - translate labels in report output
///
/// Looks up table labels, titles, captions, footnotes, layer names and
/// outline descriptions in key/value definition files and replaces them
/// with their translations.
#[derive(Parser, Debug)]
#[command(name = "pivot-translate")]
#[command(version)]
#[command(about = "Translate labels in report output from definition files")]
#[command(long_about = "pivot-translate replaces the labels of pivot tables, titles and headings
with translations looked up in key/value definition files.

EXAMPLES:
    pivot-translate translate output.json                          # Preceding command's output
    pivot-translate translate -p all output.json                   # Entire document
    pivot-translate translate -f /translations -s \"Custom Table\" output.json
    pivot-translate translate --selected-only output.json          # Selected items only
    pivot-translate translate --autoscript-item 7 output.json      # Automatic pass for one item
    pivot-translate completions bash > pivot-translate.bash

DEFINITIONS:
    The definitions folder is --folder, else $SPSS_TRANSLATOR, else the
    'extensions' folder of the configured installation path. It holds
    GLOBALTRANS.ini (section [GLOBALS]), optionally LOCALTRANS.ini, and
    optional <category>.ini files named after the normalized table subtype.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the max level is tightened once the
    // config has been read
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pivot-translate", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => Ok(run_translate(args)?),
    }
}

fn run_translate(options: TranslateArgs) -> Result<(), AppError> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = Config::load_or_default(&options.config_path)
        .map_err(|e| AppError::Config(format!("{}: {:#}", options.config_path, e)))?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let scan_options = ScanOptions {
        folder: options.folder.clone().or_else(|| config.definitions_folder.clone()),
        process: options
            .process
            .clone()
            .map(ProcessScope::from)
            .unwrap_or(config.scan.process),
        selected_only: options.selected_only || config.scan.selected_only,
        subtypes: if options.subtypes.is_empty() {
            config.scan.subtype_filter()
        } else {
            SubtypeFilter::new(&options.subtypes)
        },
    };

    let document = Document::load(&options.document)
        .map_err(|e| AppError::File(format!("failed to load {:?}: {:#}", options.document, e)))?;
    let item_count = document.items.len();

    let mut host = DocumentHost::new(document);
    if let Some(install_path) = &config.install_path {
        host = host.with_installation_path(install_path);
    }

    let scanner = DocumentScanner::new(scan_options);
    match options.autoscript_item {
        Some(index) => {
            if index >= item_count {
                return Err(HostError::IndexOutOfRange {
                    index,
                    size: item_count,
                }
                .into());
            }
            host = host.with_script_context(index);
            match scanner.run_triggered(&mut host)? {
                Some(report) => info!("Automatic pass: {}", report.stats.summary()),
                None => warn!("No item to translate"),
            }
        }
        None => {
            let report = scanner.run(&mut host)?;
            info!(
                "Examined {} item(s), translated {}",
                report.items_examined, report.items_translated
            );
        }
    }

    let output_path = options.output.unwrap_or(options.document);
    host.document()
        .save(&output_path)
        .map_err(|e| AppError::File(format!("failed to write {:?}: {:#}", output_path, e)))?;
    info!("Success: {:?}", output_path);

    Ok(())
}
