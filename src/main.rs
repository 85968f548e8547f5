use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use coursecat::cli::args::{Cli, Commands, ConfigCommands};
use coursecat::cli::commands::execute_command;
use coursecat::cli::{output, CliError};
use coursecat::config::Settings;
use coursecat::exitcode;
use coursecat::infrastructure::di::ServiceContainer;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    // `config init` creates the file `--config` may point at, so it must not require it.
    let settings = match &cli.command {
        Some(Commands::Config {
            command: ConfigCommands::Init { .. },
        }) => Ok(Settings::default()),
        _ => Settings::load(cli.config.as_deref()),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => exit_with(CliError::from(e)),
    };

    let container = ServiceContainer::new(settings);
    if let Err(e) = execute_command(&cli, &container) {
        exit_with(e);
    }
    std::process::exit(exitcode::OK);
}

fn exit_with(e: CliError) -> ! {
    output::error(&e);
    std::process::exit(e.exit_code());
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Formatted output directed to stderr, keeping stdout for the menu and data
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
