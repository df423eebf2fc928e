use anyhow::{Context, Result};
use clap::Parser;
use courtside::api::LeagueClient;
use courtside::auth::LocalSessionAuth;
use courtside::cli::Cli;
use courtside::utils::{get_config_path, get_log_dir, get_session_path};
use courtside::{styles, App, Config};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();
    let cli = Cli::parse();

    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    let log_file = log_dir.join("courtside.log");

    // --log-level wins over RUST_LOG
    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log filter: {}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file_appender = tracing_appender::rolling::never(&log_dir, "courtside.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load_or_create(&get_config_path())?.with_overrides(cli.api_url.as_deref());
    styles::init_theme(config.theme);

    if cli.command.is_some() {
        let result = cli.execute();
        drop(guard);
        return result;
    }

    eprintln!("Logs are being written to: {:?}", log_file);
    eprintln!("View logs in real-time: tail -f {:?}", log_file);
    info!("Using backend {}", config.api_base_url);

    let auth = LocalSessionAuth::load(&get_session_path())?;
    let api = LeagueClient::new(&config.api_base_url, config.request_timeout())?;

    let mut app = App::new(config, Box::new(auth), Arc::new(api), &cli.path)?;
    let result = app.run();

    drop(guard);
    result
}
