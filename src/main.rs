// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![cfg_attr(test, allow(non_snake_case))]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subsafe::app_config::{Config, LogLevel};
use subsafe::errors::AppError;
use subsafe::sanitizer::{audit_cues, SanitizePreset};
use subsafe::subtitle::{
    parse_srt, parse_subtitles, parse_webvtt, to_srt, to_webvtt, ParseResult,
};

/// CLI Wrapper for the input format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Auto,
    Srt,
    Vtt,
}

/// CLI Wrapper for SanitizePreset to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPreset {
    None,
    Default,
    Vtt,
    Plain,
    Dom,
    Translation,
}

impl From<CliPreset> for SanitizePreset {
    fn from(cli_preset: CliPreset) -> Self {
        match cli_preset {
            CliPreset::None => SanitizePreset::None,
            CliPreset::Default => SanitizePreset::Default,
            CliPreset::Vtt => SanitizePreset::Vtt,
            CliPreset::Plain => SanitizePreset::Plain,
            CliPreset::Dom => SanitizePreset::Dom,
            CliPreset::Translation => SanitizePreset::Translation,
        }
    }
}

/// Output rendering for `parse`
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutput {
    Json,
    Srt,
    Vtt,
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a subtitle file, sanitize every cue and print the result
    Parse {
        /// Subtitle file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input format
        #[arg(short, long, value_enum, default_value = "auto")]
        format: CliFormat,

        /// Sanitizer preset (defaults to the config file's preset)
        #[arg(short, long, value_enum)]
        preset: Option<CliPreset>,

        /// Output rendering
        #[arg(short, long, value_enum, default_value = "json")]
        output: CliOutput,
    },

    /// Report dangerous content per cue without modifying anything
    Audit {
        /// Subtitle file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completions for subsafe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subsafe - subtitle parsing and sanitization
#[derive(Parser, Debug)]
#[command(name = "subsafe")]
#[command(version)]
#[command(about = "Parse SRT/WebVTT subtitles and strip injection payloads from cue text")]
#[command(long_about = "subsafe reads SRT and WebVTT files into timed cues and sanitizes cue text.

EXAMPLES:
    subsafe parse movie.srt                        # Sanitized cues as JSON
    subsafe parse movie.vtt -p vtt -o vtt         # Keep safe formatting, write WebVTT
    subsafe parse movie.srt -p plain -o srt       # Plain text SRT
    subsafe audit movie.srt                        # List threats per cue
    subsafe completions bash > subsafe.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn read_subtitles(path: &Path, format: CliFormat) -> Result<ParseResult, AppError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::File(format!("Failed to read subtitle file {}: {}", path.display(), e))
    })?;

    let parsed = match format {
        CliFormat::Auto => parse_subtitles(&content)?,
        CliFormat::Srt => parse_srt(&content),
        CliFormat::Vtt => parse_webvtt(&content)?,
    };

    info!("Parsed {} cues from {}", parsed.len(), path.display());
    Ok(parsed)
}

/// Load a config file and check it, reporting both failures as configuration errors
fn load_config(path: &Path) -> Result<Config, AppError> {
    let config = Config::load_or_create(path).map_err(|e| AppError::Config(format!("{:#}", e)))?;
    config
        .validate()
        .map_err(|e| AppError::Config(format!("Configuration validation failed: {}", e)))?;
    Ok(config)
}

fn run_parse(
    config: &Config,
    file: &Path,
    format: CliFormat,
    preset: Option<CliPreset>,
    output: CliOutput,
) -> Result<String, AppError> {
    let parsed = read_subtitles(file, format)?;
    let preset = preset.map(SanitizePreset::from).unwrap_or(config.sanitizer.preset);

    let sanitized = preset.apply_to_cues(&parsed.cues, config.sanitizer.max_length);
    if sanitized.total_modified > 0 {
        warn!(
            "Preset '{}' modified {} of {} cues",
            preset,
            sanitized.total_modified,
            sanitized.cues.len()
        );
    }

    let rendered = match output {
        CliOutput::Json => serde_json::to_string_pretty(&sanitized)
            .context("Failed to serialize cues to JSON")?,
        CliOutput::Srt => to_srt(&sanitized.cues),
        CliOutput::Vtt => to_webvtt(&sanitized.cues, parsed.metadata.header.as_deref()),
    };

    Ok(rendered.trim_end().to_string())
}

fn run_audit(file: &Path) -> Result<String, AppError> {
    let parsed = read_subtitles(file, CliFormat::Auto)?;
    let report = audit_cues(&parsed.cues);

    if report.is_empty() {
        info!("No dangerous content found in {} cues", parsed.len());
    } else {
        warn!("{} of {} cues contain dangerous content", report.len(), parsed.len());
    }

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize audit report")?;
    Ok(json)
}

/// Run one subcommand and print its output
fn run_command(config: &Config, command: Commands) -> Result<(), AppError> {
    let rendered = match command {
        Commands::Parse { file, format, preset, output } => {
            run_parse(config, &file, format, preset, output)?
        }
        Commands::Audit { file } => run_audit(&file)?,
        Commands::Completions { .. } => return Ok(()),
    };

    writeln!(std::io::stdout().lock(), "{}", rendered)?;
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subsafe", &mut std::io::stdout());
        return Ok(());
    }

    // Start at the CLI level (or info) and lower to the config's once loaded
    let cli_level = cli.log_level.map(LogLevel::from);
    CustomLogger::init(LevelFilter::from(cli_level.unwrap_or_default()))?;

    let config = load_config(&cli.config)?;

    if cli_level.is_none() {
        log::set_max_level(LevelFilter::from(config.log_level));
    }
    debug!("Loaded configuration from {}", cli.config.display());

    run_command(&config, cli.command)?;
    Ok(())
}
