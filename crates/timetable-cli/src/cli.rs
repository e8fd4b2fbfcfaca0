use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Query weekly class timetables from extracted document tables.
#[derive(Debug, Parser)]
#[command(name = "timetable", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report the weekday header layout of every table
    Detect {
        /// Path to the JSON matrices document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the week parities present in the timetable
    Weeks {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the weekdays that have lessons in a week
    Days {
        #[command(flatten)]
        source: SourceArgs,

        /// Week parity
        #[arg(long, default_value_t = 1)]
        week: u32,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the lessons of one day
    Lessons {
        #[command(flatten)]
        source: SourceArgs,

        /// Week parity
        #[arg(long, default_value_t = 1)]
        week: u32,

        /// Weekday, full or abbreviated (e.g. 'Понедельник', 'Пн')
        #[arg(long)]
        day: String,

        /// Wrap hour ranges in <b> tags and escape the rest as HTML
        #[arg(long)]
        html: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the whole timetable
    Dump {
        #[command(flatten)]
        source: SourceArgs,

        /// Wrap hour ranges in <b> tags and escape the rest as HTML
        #[arg(long)]
        html: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show document and parse metadata
    Info {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Where the timetable comes from and how to parse it.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Path to the JSON matrices document
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Class name (e.g. '10А'), used to recognise group markers
    #[arg(long)]
    pub class: Option<String>,

    /// Directory of the persistent schedule cache (default: $TIMETABLE_DATA_DIR/schedules)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON output
    Json,
}
