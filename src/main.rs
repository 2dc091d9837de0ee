// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use tweetstore::app_config::{self, Config};
use tweetstore::database::SqlDatabase;
use tweetstore::status::load_statuses;

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
    #[command(flatten)]
    Database(DatabaseCommand),

    /// Generate shell completions for tweetstore
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Commands that run against the configured database
#[derive(Subcommand, Debug)]
enum DatabaseCommand {
    /// List the tables of the database
    Tables,

    /// Create a status table
    Create {
        /// Name of the table to create
        table: String,
    },

    /// Drop a table
    Drop {
        /// Name of the table to drop
        table: String,
    },

    /// Insert statuses from a JSON file or a directory of JSON files
    Insert {
        /// JSON array, JSON object or JSON lines file, or a directory of them
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Target table (defaults to the configured table)
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Print every value of one column
    Column {
        /// Column name, e.g. 'editedText'
        field: String,

        /// Table to read (defaults to the configured table)
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Print the number of rows in a table
    Count {
        /// Table to count (defaults to the configured table)
        #[arg(short, long)]
        table: Option<String>,
    },
}

/// tweetstore - archive statuses in a relational table
#[derive(Parser, Debug)]
#[command(name = "tweetstore")]
#[command(version)]
#[command(about = "Archive social-media statuses in a relational table")]
#[command(long_about = "tweetstore stores statuses (tweets) in a fixed-schema table, skipping ids that are already archived.

EXAMPLES:
    tweetstore create statuses                 # Create the status table
    tweetstore insert dump.jsonl               # Insert statuses into the configured table
    tweetstore insert ./dumps -t archive_2024  # Insert every .json/.jsonl file of a directory
    tweetstore column editedText               # Print cleaned text, one row per line
    tweetstore count                           # Print the number of stored statuses
    tweetstore completions bash > tweetstore.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = "conf.json")]
    config_path: String,

    /// Database name (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Database password (overrides the config file)
    #[arg(long, global = true, env = "TWEETSTORE_DB_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Coloured stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
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
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Start at trace so the level chosen later via set_max_level is honored
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let command = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tweetstore", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Database(command) => command,
    };

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(database) = &cli.database {
        config.database.name = database.clone();
    }
    if let Some(password) = &cli.password {
        config.connector.password = password.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;

    let db = config.prepare_database()?;
    info!("Using database '{}' at {}", db.name(), db.url());

    run_command(command, &db, &config)
}

fn run_command(command: DatabaseCommand, db: &SqlDatabase, config: &Config) -> Result<()> {
    let table_or_default = |table: Option<String>| table.unwrap_or_else(|| config.database.table.clone());
    let mut stdout = std::io::stdout().lock();

    match command {
        DatabaseCommand::Tables => {
            for table in db.list_tables() {
                writeln!(stdout, "{}", table)?;
            }
        }
        DatabaseCommand::Create { table } => db.create_table(&table),
        DatabaseCommand::Drop { table } => db.drop_table(&table),
        DatabaseCommand::Insert { input_path, table } => {
            let table = table_or_default(table);
            let statuses = load_statuses(&input_path)
                .with_context(|| format!("Failed to load statuses from {:?}", input_path))?;
            info!("Loaded {} statuses from {:?}", statuses.len(), input_path);

            let inserted = db.insert_records(&statuses, &table);
            writeln!(stdout, "{}", inserted)?;
        }
        DatabaseCommand::Column { field, table } => {
            let table = table_or_default(table);
            for value in db.get_column(&field, &table) {
                writeln!(stdout, "{}", value)?;
            }
        }
        DatabaseCommand::Count { table } => {
            let table = table_or_default(table);
            writeln!(stdout, "{}", db.get_row_count(&table))?;
        }
    }

    Ok(())
}
