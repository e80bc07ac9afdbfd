mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use theft_dashboard::config::init_app_config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Without a terminal there is nothing to draw on
    let headless = args.headless || !is_terminal();
    // Dropped at the end of main, after the terminal is restored
    let _log_guard = logging::init_tracing(&config, headless)?;
    info!(source = %config.source, headless, "starting theft dashboard");

    if headless {
        return event::run_headless(&config, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let mut app = App::new(&config);

    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
