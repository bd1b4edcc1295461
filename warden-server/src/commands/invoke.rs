use anyhow::{Context, Result};
use std::path::PathBuf;

use warden_resources::{handle_database_event, DatabaseEvent, PgAdmin, ResponseReporter};

use crate::config::Config;

/// One-shot invocation: read a lifecycle event from disk, run the database
/// handler (which posts the terminal response itself) and print the envelope.
pub async fn run(event_file: PathBuf) -> Result<()> {
    let config = Config::load()?;

    let raw = std::fs::read_to_string(&event_file)
        .with_context(|| format!("failed to read {}", event_file.display()))?;
    let event: DatabaseEvent =
        serde_json::from_str(&raw).context("event file is not a valid lifecycle event")?;

    let secrets = super::secret_store(&config);
    let admin = PgAdmin::new();
    let reporter = ResponseReporter::new();

    let envelope = handle_database_event(
        &admin,
        secrets.as_ref(),
        &reporter,
        &config.db_secret_ref,
        &event,
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
