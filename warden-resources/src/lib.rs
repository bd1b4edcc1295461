//! Warden resource handlers - out-of-band lifecycle operations for the
//! password-manager platform
//!
//! The deployment orchestrator drives most infrastructure declaratively; two
//! resources need procedural handling and live here:
//!
//! - the logical-database lifecycle (create / rename / drop inside the
//!   managed database server), see [`database`]
//! - the read-only managed address-list lookup, see [`address_list`]
//!
//! Every invocation is single-use: one connection secret resolved, at most
//! one administrative connection opened and closed, exactly one terminal
//! response delivered to the event's callback address.

pub mod address_list;
pub mod connection;
pub mod database;
pub mod error;
pub mod reporter;
pub mod secrets;

// Re-export the handler entry points and their seams
pub use address_list::{handle_lookup, AddressListEvent, AddressListInventory, HttpInventory};
pub use connection::{AdminSession, ConnectionDescriptor, DatabaseAdmin, PgAdmin};
pub use database::{handle_database_event, physical_resource_id, DatabaseEvent};
pub use error::{
    CallbackDeliveryError, ConnectionError, HandlerError, LookupError, SecretFetchError,
    StatementError,
};
pub use reporter::ResponseReporter;
pub use secrets::{resolve_connection, EnvSecretStore, HttpSecretStore, SecretStore};
