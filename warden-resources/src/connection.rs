//! Transient administrative connections to the managed database server

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::NoTls;

use crate::error::{ConnectionError, StatementError};

/// Where and how to reach the server's administrative port
///
/// Derived once per invocation from the connection secret and discarded at
/// its end; never persisted or shared across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Opens administrative sessions; the seam the lifecycle controller is
/// exercised through in tests
#[async_trait]
pub trait DatabaseAdmin: Send + Sync {
    /// Open exactly one transient session for the current invocation
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn AdminSession>, ConnectionError>;
}

/// One open administrative session
#[async_trait]
pub trait AdminSession: Send {
    /// Execute a single DDL statement: one blocking round-trip, never
    /// batched, returning the effect count on success
    async fn execute(&mut self, statement: &str) -> Result<u64, StatementError>;

    /// Tear the session down; runs on every exit path of an invocation
    async fn close(self: Box<Self>);
}

/// tokio-postgres backed [`DatabaseAdmin`]
#[derive(Debug, Clone, Default)]
pub struct PgAdmin;

impl PgAdmin {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseAdmin for PgAdmin {
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn AdminSession>, ConnectionError> {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&descriptor.host)
            .port(descriptor.port)
            .user(&descriptor.username)
            .password(&descriptor.password)
            .dbname("postgres");

        // Transport encryption stays off on this internal administrative
        // path; see the security note in DESIGN.md.
        let (client, connection) = config.connect(NoTls).await.map_err(|e| ConnectionError {
            host: descriptor.host.clone(),
            port: descriptor.port,
            message: e.to_string(),
        })?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "administrative connection terminated with error");
            }
        });

        tracing::debug!(host = %descriptor.host, port = descriptor.port, "administrative session opened");

        Ok(Box::new(PgSession { client, driver }))
    }
}

struct PgSession {
    client: tokio_postgres::Client,
    driver: JoinHandle<()>,
}

#[async_trait]
impl AdminSession for PgSession {
    async fn execute(&mut self, statement: &str) -> Result<u64, StatementError> {
        self.client
            .execute(statement, &[])
            .await
            .map_err(StatementError::from)
    }

    async fn close(self: Box<Self>) {
        // Dropping the client ends the connection; reap the driver task so
        // nothing outlives the invocation.
        drop(self.client);
        if let Err(e) = self.driver.await {
            if !e.is_cancelled() {
                tracing::warn!(error = %e, "connection driver task failed");
            }
        }
        tracing::debug!("administrative session closed");
    }
}

impl From<tokio_postgres::Error> for StatementError {
    fn from(err: tokio_postgres::Error) -> Self {
        let sqlstate = err.as_db_error().map(|db| db.code().code().to_string());
        Self {
            message: err.to_string(),
            sqlstate,
        }
    }
}
