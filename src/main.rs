// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use bhashabridge::Controller;
use bhashabridge::app_config::{self, Config, FallbackPolicy, GenerationBackend};
use bhashabridge::pipeline::HandleStatus;

/// CLI Wrapper for GenerationBackend to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliBackend {
    #[value(name = "huggingface", alias = "hf")]
    HuggingFace,
    Disabled,
}

impl From<CliBackend> for GenerationBackend {
    fn from(cli_backend: CliBackend) -> Self {
        match cli_backend {
            CliBackend::HuggingFace => GenerationBackend::HuggingFace,
            CliBackend::Disabled => GenerationBackend::Disabled,
        }
    }
}

/// CLI Wrapper for FallbackPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFallbackPolicy {
    PassThrough,
    Surface,
}

impl From<CliFallbackPolicy> for FallbackPolicy {
    fn from(cli_policy: CliFallbackPolicy) -> Self {
        match cli_policy {
            CliFallbackPolicy::PassThrough => FallbackPolicy::PassThrough,
            CliFallbackPolicy::Surface => FallbackPolicy::Surface,
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
    /// Run the HTTP service (default command)
    Serve {
        /// Address to bind, overrides the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Process one snippet and print the report as JSON
    Process {
        /// Text to classify and process
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Generate shell completions for bhashabridge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// BhashaBridge - English, Bengali and Banglish text assistant
///
/// Detects whether a snippet is English, Bengali or romanized Bengali and
/// corrects, transliterates and translates it through hosted models.
#[derive(Parser, Debug)]
#[command(name = "bhashabridge")]
#[command(version)]
#[command(about = "English / Bengali / Banglish detection, correction and translation service")]
#[command(long_about = "BhashaBridge classifies text as English, Bengali or Banglish and runs the matching chain:
Banglish is transliterated then translated to English, English is grammar-corrected then
translated to Bengali, Bengali is translated to English.

EXAMPLES:
    bhashabridge                                    # Serve on the configured address
    bhashabridge serve --bind 0.0.0.0:8080          # Serve on another address
    bhashabridge process \"ami tomay bhalobashi\"     # Process one snippet
    bhashabridge --backend disabled process \"Hi\"    # Run without any model calls
    bhashabridge completions bash > bhashabridge.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. The Hugging Face token is read from HF_TOKEN.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Generation backend to use
    #[arg(long, value_enum, global = true)]
    backend: Option<CliBackend>,

    /// What generative steps do when their model is unavailable
    #[arg(long, value_enum, global = true)]
    fallback_policy: Option<CliFallbackPolicy>,

    /// Hugging Face API token
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, global = true)]
    hf_token: Option<String>,
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

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
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
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger at trace and narrow it with set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "bhashabridge", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config)?;

    match cli.command {
        Some(Commands::Process { text }) => {
            let (json, status) = controller.process_to_json(&text).await?;
            println!("{}", json);
            if status == HandleStatus::BadRequest {
                std::process::exit(2);
            }
            Ok(())
        }
        Some(Commands::Serve { .. }) | None => controller.serve().await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Load the configuration file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.into());
    }

    let (mut config, created) = Config::load_or_create(&cli.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config_path.display());
    }

    if let Some(backend) = &cli.backend {
        config.gateway.backend = backend.clone().into();
    }

    if let Some(policy) = &cli.fallback_policy {
        config.gateway.fallback_policy = policy.clone().into();
    }

    if let Some(token) = &cli.hf_token {
        config.gateway.api_token = token.clone();
    }

    if let Some(Commands::Serve { bind: Some(bind) }) = &cli.command {
        config.server.bind_address = bind.clone();
    }

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    log::set_max_level(config.log_level.into());
    info!("Loaded configuration from {}", cli.config_path.display());

    Ok(config)
}
