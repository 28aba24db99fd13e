use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use gameday::cache::{CachedRangeProvider, FileStore, MemoryStore, RangeLimitsStore};
use gameday::config::{self, Config};
use gameday::data_provider::{HttpRangeProvider, RangeLimitsProvider};
use gameday::range::BoundsResolver;
use gameday::{commands, tui};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "gameday")]
#[command(
    about = "Date slider bounded by the season's range",
    long_about = "Date slider bounded by the season's range\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Serve range limits from built-in fixtures instead of the network
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the resolved date range and where it came from
    Range {
        /// Bypass the in-session memo and refetch
        #[arg(short, long)]
        refresh: bool,
    },
    /// Display the day window around a date
    Days {
        /// Date in YYYY-MM-DD format (optional, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Display the month window for a date
    Months {
        /// Date in YYYY-MM-DD format (optional, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    match FileStore::from_xdg() {
        Some(store) => println!("Cache Directory: {}", store.dir().display()),
        None => println!("Cache Directory: unavailable (in-memory only)"),
    }
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("range_url: {}", cfg.range_url.as_deref().unwrap_or("(none)"));
    println!("range_offset_months: {}", cfg.range_offset_months);
    println!("day_radius: {}", cfg.day_radius);
    println!("month_radius: {}", cfg.month_radius);
    println!("drag_gain: {}", cfg.drag_gain);
    println!("native_drag_scroll: {}", cfg.native_drag_scroll);
    println!("memo_lifespan_secs: {}", cfg.memo_lifespan_secs);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("today_fg: {:?}{}",
        cfg.theme.today_fg(),
        if cfg.theme.today_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Authoritative provider, memoized for the session; `None` when none is configured
fn create_provider(cli: &Cli, config: &Config) -> Option<Arc<dyn RangeLimitsProvider>> {
    #[cfg(feature = "development")]
    {
        if cli.mock {
            let mock = gameday::dev::mock_provider::MockProvider::new();
            return Some(Arc::new(CachedRangeProvider::new(mock, config.memo_lifespan_secs)));
        }
    }
    #[cfg(not(feature = "development"))]
    let _ = cli;

    let url = config.range_url.as_deref()?;
    match HttpRangeProvider::new(url) {
        Ok(http) => Some(Arc::new(CachedRangeProvider::new(http, config.memo_lifespan_secs))),
        Err(e) => {
            warn!("Cannot create range client for {}: {}", url, e);
            None
        }
    }
}

fn create_store() -> Arc<dyn RangeLimitsStore> {
    match FileStore::from_xdg() {
        Some(store) => Arc::new(store),
        None => {
            warn!("No cache directory available, range limits will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(resolver: &BoundsResolver, config: &Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Config => {
            handle_config_command(config);
            Ok(())
        }
        Commands::Range { refresh } => commands::range::run(resolver, refresh).await,
        Commands::Days { date } => commands::days::run(resolver, date, config.picker_settings()).await,
        Commands::Months { date } => commands::months::run(resolver, date, config.picker_settings()).await,
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let resolver = BoundsResolver::new(create_provider(&cli, &config), create_store())
        .with_offset_months(config.range_offset_months);

    // If no subcommand, run TUI
    let Some(command) = cli.command else {
        if let Err(e) = tui::run(Arc::new(resolver), config).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    };

    if let Err(e) = execute_command(&resolver, &config, command).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
