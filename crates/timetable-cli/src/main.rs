mod cli;
mod days_cmd;
mod detect_cmd;
mod dump_cmd;
mod info_cmd;
mod lessons_cmd;
mod shared;
mod weeks_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Detect { ref file, format } => detect_cmd::run(file, format),
        Commands::Weeks { ref source, format } => weeks_cmd::run(source, format),
        Commands::Days {
            ref source,
            week,
            format,
        } => days_cmd::run(source, week, format),
        Commands::Lessons {
            ref source,
            week,
            ref day,
            html,
            format,
        } => lessons_cmd::run(source, week, day, html, format),
        Commands::Dump {
            ref source,
            html,
            format,
        } => dump_cmd::run(source, html, format),
        Commands::Info { ref source, format } => info_cmd::run(source, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
