//! Error taxonomy for the resource handlers

use thiserror::Error;

/// The connection secret was missing or its payload unusable
#[derive(Debug, Error)]
#[error("failed to resolve connection secret `{reference}`: {message}")]
pub struct SecretFetchError {
    pub reference: String,
    pub message: String,
}

/// The administrative connection could not be opened
#[derive(Debug, Error)]
#[error("failed to connect to {host}:{port}: {message}")]
pub struct ConnectionError {
    pub host: String,
    pub port: u16,
    pub message: String,
}

/// A DDL statement failed
///
/// Carries the server's SQLSTATE when one was reported, so callers can
/// recognize the replay-induced failure modes without string matching.
#[derive(Debug, Error)]
#[error("statement failed: {message}")]
pub struct StatementError {
    pub message: String,
    pub sqlstate: Option<String>,
}

impl StatementError {
    /// duplicate_database: the database being created is already there
    pub fn already_exists(&self) -> bool {
        self.sqlstate.as_deref() == Some("42P04")
    }

    /// invalid_catalog_name: the database being dropped is already gone
    pub fn does_not_exist(&self) -> bool {
        self.sqlstate.as_deref() == Some("3D000")
    }
}

/// The terminal POST to the callback address failed or was rejected
#[derive(Debug, Error)]
pub enum CallbackDeliveryError {
    #[error("callback POST to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("callback endpoint {url} answered {status}")]
    Rejected { url: String, status: u16 },
}

/// The inventory API could not resolve a managed address list
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("inventory API request failed: {0}")]
    Api(String),
    #[error("no managed address list named `{0}`")]
    NotFound(String),
}

/// Umbrella error for the database lifecycle path
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    SecretFetch(#[from] SecretFetchError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Statement(#[from] StatementError),
}
