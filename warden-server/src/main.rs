use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod commands;
mod config;

use cli::{Args, Mode};

/// Initialize console tracing with a crate-scoped default filter
fn initialize_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,\
         warden_server=debug,\
         warden_resources=debug"
            .into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    initialize_tracing();

    match args.mode {
        Mode::Serve { port } => commands::serve::run(port).await,
        Mode::Invoke { event_file } => commands::invoke::run(event_file).await,
        Mode::Lookup { name } => commands::lookup::run(name).await,
    }
}
