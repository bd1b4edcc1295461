use anyhow::Result;
use std::sync::Arc;

use warden_resources::{HttpInventory, PgAdmin, ResponseReporter};

use crate::api::{self, AppState};
use crate::config::Config;

pub async fn run(port: Option<u16>) -> Result<()> {
    let config = Config::load()?;
    let port = port.unwrap_or(config.server_port);

    let state = AppState {
        admin: Arc::new(PgAdmin::new()),
        secrets: super::secret_store(&config),
        inventory: Arc::new(HttpInventory::new(config.inventory_url.clone())),
        reporter: Arc::new(ResponseReporter::new()),
        db_secret_ref: config.db_secret_ref.clone(),
    };

    tracing::info!(
        secret_ref = %config.db_secret_ref,
        inventory = %config.inventory_url,
        "starting invocation API"
    );

    api::start_server(&config.server_host, port, state).await
}
