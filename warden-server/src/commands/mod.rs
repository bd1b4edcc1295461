pub mod invoke;
pub mod lookup;
pub mod serve;

use std::sync::Arc;
use warden_resources::{EnvSecretStore, HttpSecretStore, SecretStore};

use crate::config::Config;

/// Pick the secret store backend the configuration asks for
pub(crate) fn secret_store(config: &Config) -> Arc<dyn SecretStore> {
    match &config.secret_store_url {
        Some(url) => Arc::new(HttpSecretStore::new(url.clone())),
        None => {
            tracing::warn!(
                "WARDEN_SECRET_STORE_URL not set, falling back to the environment secret store"
            );
            Arc::new(EnvSecretStore::new())
        }
    }
}
