//! Connection-secret resolution

use async_trait::async_trait;
use warden_models::DatabaseSecret;

use crate::connection::ConnectionDescriptor;
use crate::error::SecretFetchError;

/// Administrative port used when the secret does not carry one
pub const DEFAULT_ADMIN_PORT: u16 = 5432;

/// Read access to the secret store holding connection credentials
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the raw JSON payload stored under `reference`
    async fn fetch(&self, reference: &str) -> Result<String, SecretFetchError>;
}

/// KV-style secrets service reached over HTTP
pub struct HttpSecretStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSecretStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SecretStore for HttpSecretStore {
    async fn fetch(&self, reference: &str) -> Result<String, SecretFetchError> {
        let url = format!("{}/v1/secrets/{}", self.base_url, reference);
        let response = self.client.get(&url).send().await.map_err(|e| SecretFetchError {
            reference: reference.to_string(),
            message: format!("secret store request failed: {}", e),
        })?;

        if !response.status().is_success() {
            return Err(SecretFetchError {
                reference: reference.to_string(),
                message: format!("secret store answered {}", response.status()),
            });
        }

        response.text().await.map_err(|e| SecretFetchError {
            reference: reference.to_string(),
            message: format!("failed to read secret payload: {}", e),
        })
    }
}

/// Environment-variable secret store for development and tests
///
/// A reference `warden/db-admin` is read from `WARDEN_SECRET_WARDEN_DB_ADMIN`.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }

    fn variable_name(reference: &str) -> String {
        let suffix: String = reference
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("WARDEN_SECRET_{}", suffix)
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn fetch(&self, reference: &str) -> Result<String, SecretFetchError> {
        let name = Self::variable_name(reference);
        std::env::var(&name).map_err(|_| SecretFetchError {
            reference: reference.to_string(),
            message: format!("environment variable {} is not set", name),
        })
    }
}

/// Resolve the secret under `reference` into a connection descriptor
///
/// The payload must carry `host`, `username` and `password`; `port` falls
/// back to [`DEFAULT_ADMIN_PORT`]. One descriptor per invocation.
pub async fn resolve_connection(
    store: &dyn SecretStore,
    reference: &str,
) -> Result<ConnectionDescriptor, SecretFetchError> {
    let payload = store.fetch(reference).await?;
    descriptor_from_payload(reference, &payload)
}

fn descriptor_from_payload(
    reference: &str,
    payload: &str,
) -> Result<ConnectionDescriptor, SecretFetchError> {
    let secret: DatabaseSecret = serde_json::from_str(payload).map_err(|e| SecretFetchError {
        reference: reference.to_string(),
        message: format!("malformed secret payload: {}", e),
    })?;

    Ok(ConnectionDescriptor {
        host: secret.host,
        port: secret.port.unwrap_or(DEFAULT_ADMIN_PORT),
        username: secret.username,
        password: secret.password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_maps_payload_fields_verbatim() {
        let descriptor = descriptor_from_payload(
            "warden/db-admin",
            r#"{"host": "db.internal", "port": 5433, "username": "admin", "password": "s3cret"}"#,
        )
        .unwrap();

        assert_eq!(descriptor.host, "db.internal");
        assert_eq!(descriptor.port, 5433);
        assert_eq!(descriptor.username, "admin");
        assert_eq!(descriptor.password, "s3cret");
    }

    #[test]
    fn test_descriptor_defaults_port() {
        let descriptor = descriptor_from_payload(
            "warden/db-admin",
            r#"{"host": "db.internal", "username": "admin", "password": "s3cret"}"#,
        )
        .unwrap();
        assert_eq!(descriptor.port, DEFAULT_ADMIN_PORT);
    }

    #[test]
    fn test_malformed_payload_is_a_secret_fetch_error() {
        let err = descriptor_from_payload("warden/db-admin", r#"{"host": "db.internal"}"#)
            .unwrap_err();
        assert_eq!(err.reference, "warden/db-admin");
        assert!(err.message.contains("malformed secret payload"));

        let err = descriptor_from_payload("warden/db-admin", "not json").unwrap_err();
        assert!(err.message.contains("malformed secret payload"));
    }

    #[test]
    fn test_env_variable_name_mapping() {
        assert_eq!(
            EnvSecretStore::variable_name("warden/db-admin"),
            "WARDEN_SECRET_WARDEN_DB_ADMIN"
        );
        assert_eq!(EnvSecretStore::variable_name("db"), "WARDEN_SECRET_DB");
    }

    #[tokio::test]
    async fn test_env_store_fetch() {
        std::env::set_var(
            "WARDEN_SECRET_TEST_FETCH_REF",
            r#"{"host": "db.internal", "username": "admin", "password": "pw"}"#,
        );
        let store = EnvSecretStore::new();
        let descriptor = resolve_connection(&store, "test/fetch-ref").await.unwrap();
        assert_eq!(descriptor.host, "db.internal");

        let err = resolve_connection(&store, "test/absent-ref").await.unwrap_err();
        assert!(err.message.contains("WARDEN_SECRET_TEST_ABSENT_REF"));
    }
}
