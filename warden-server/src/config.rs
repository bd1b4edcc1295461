use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Reference resolved through the secret store for database credentials
    pub db_secret_ref: String,
    /// Base URL of the secret store; the environment backend is used when unset
    pub secret_store_url: Option<String>,
    /// Base URL of the managed address-list inventory API
    pub inventory_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            db_secret_ref: std::env::var("WARDEN_DB_SECRET_REF")
                .context("WARDEN_DB_SECRET_REF must be set")?,
            secret_store_url: std::env::var("WARDEN_SECRET_STORE_URL").ok(),
            inventory_url: std::env::var("WARDEN_INVENTORY_URL")
                .context("WARDEN_INVENTORY_URL must be set")?,
        })
    }
}
