use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

use sealdeck::app;
use sealdeck::config::{Cli, Config};

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Log to a file; stdout belongs to the TUI.
    let log_dir = cli.log_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(std::path::Path::new("."));
    let log_name = cli.log_file.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "sealdeck.log".into());
    let appender = tracing_appender::rolling::never(log_dir, log_name);
    let (writer, _guard) = tracing_appender::non_blocking(appender);

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=info".parse().map_err(io::Error::other)?)
        .add_directive("reqwest=info".parse().map_err(io::Error::other)?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();

    let config = Config::from(&cli);
    let backend = config.build_backend().map_err(io::Error::other)?;
    tracing::info!(backend = %backend.describe(), "Starting sealdeck");

    let should_quit = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&should_quit))?;
    signal_hook::flag::register(SIGINT, Arc::clone(&should_quit))?;

    // Leave the terminal usable if anything panics mid-frame.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        app::restore_terminal();
        default_hook(info);
    }));

    let result = app::run(backend, &config, should_quit);
    app::restore_terminal();

    if let Err(ref e) = result {
        tracing::error!(error = %e, "sealdeck exited with an error");
    }
    tracing::info!("Goodbye!");
    result
}
