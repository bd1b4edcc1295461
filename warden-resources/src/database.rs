//! Logical-database lifecycle controller

use warden_models::{DatabaseProperties, LifecycleEvent, RequestType, ResponseEnvelope};

use crate::connection::{AdminSession, ConnectionDescriptor, DatabaseAdmin};
use crate::error::HandlerError;
use crate::reporter::ResponseReporter;
use crate::secrets::{resolve_connection, SecretStore};

pub type DatabaseEvent = LifecycleEvent<DatabaseProperties>;

/// Stable identifier correlating the logical database across its lifecycle.
/// A pure function of the server host and the logical name: renaming the
/// database under Update yields a new identifier.
pub fn physical_resource_id(host: &str, database_name: &str) -> String {
    format!("{}/{}", host, database_name)
}

pub fn create_database_statement(name: &str) -> String {
    format!("CREATE DATABASE {}", quoted(name))
}

pub fn drop_database_statement(name: &str) -> String {
    format!("DROP DATABASE {}", quoted(name))
}

fn quoted(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Handle one database lifecycle event end to end
///
/// Produces exactly one envelope per call and delivers it to the event's
/// callback address whichever branch is taken. The administrative session,
/// when one was opened, is closed before the outcome is propagated.
pub async fn handle_database_event(
    admin: &dyn DatabaseAdmin,
    secrets: &dyn SecretStore,
    reporter: &ResponseReporter,
    secret_ref: &str,
    event: &DatabaseEvent,
) -> ResponseEnvelope {
    let name = &event.resource_properties.database_name;

    let (physical_id, result) = match resolve_connection(secrets, secret_ref).await {
        Ok(descriptor) => {
            let physical_id = physical_resource_id(&descriptor.host, name);
            let result = run_statements(admin, &descriptor, event).await;
            (physical_id, result)
        }
        // Without a descriptor there is no host to derive the identifier
        // from; the bare logical name keeps the id deterministic.
        Err(e) => (name.clone(), Err(HandlerError::from(e))),
    };

    let envelope = match result {
        Ok(()) => event.success_envelope(physical_id),
        Err(e) => {
            tracing::error!(error = %e, database = %name, request_id = %event.request_id, "lifecycle operation failed");
            event.failure_envelope(physical_id, e.to_string())
        }
    };

    // The terminal report is the last action of every invocation. Delivery
    // failures are logged apart from business failures and not retried;
    // the orchestrator re-invokes on its own schedule.
    if let Err(e) = reporter.report(&event.response_url, &envelope).await {
        tracing::error!(error = %e, request_id = %event.request_id, "terminal response was not delivered");
    }

    envelope
}

/// Open the single administrative session for this invocation and apply the
/// statements dictated by the request type; the session is closed on every
/// path out of here.
async fn run_statements(
    admin: &dyn DatabaseAdmin,
    descriptor: &ConnectionDescriptor,
    event: &DatabaseEvent,
) -> Result<(), HandlerError> {
    let mut session = admin.connect(descriptor).await?;
    let outcome = apply(session.as_mut(), event).await;
    session.close().await;
    outcome
}

async fn apply(session: &mut dyn AdminSession, event: &DatabaseEvent) -> Result<(), HandlerError> {
    let name = &event.resource_properties.database_name;

    match event.request_type {
        RequestType::Create => {
            session.execute(&create_database_statement(name)).await?;
            tracing::info!(database = %name, "database created");
        }
        RequestType::Update => {
            let previous = event
                .old_resource_properties
                .as_ref()
                .map(|p| p.database_name.as_str());
            match previous {
                Some(old) if old != name => {
                    // Create the successor before dropping the predecessor:
                    // a failed create must leave the old database in place.
                    session.execute(&create_database_statement(name)).await?;
                    session.execute(&drop_database_statement(old)).await?;
                    tracing::info!(from = %old, to = %name, "database renamed");
                }
                _ => {
                    tracing::info!(database = %name, "update kept the database name, nothing to do");
                }
            }
        }
        RequestType::Delete => {
            // Stack teardown must not be blocked by this resource: drop
            // failures, including an already-absent database, resolve the
            // event SUCCESS anyway.
            match session.execute(&drop_database_statement(name)).await {
                Ok(_) => tracing::info!(database = %name, "database dropped"),
                Err(e) if e.does_not_exist() => {
                    tracing::info!(database = %name, "database already absent");
                }
                Err(e) => {
                    tracing::warn!(error = %e, database = %name, "drop failed during delete, continuing");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_resource_id_is_host_slash_name() {
        assert_eq!(physical_resource_id("db.internal", "vault"), "db.internal/vault");
    }

    #[test]
    fn test_physical_resource_id_changes_with_name() {
        let before = physical_resource_id("db.internal", "vault");
        let after = physical_resource_id("db.internal", "vault_v2");
        assert_ne!(before, after);
    }

    #[test]
    fn test_statements_quote_identifiers() {
        assert_eq!(create_database_statement("vault"), "CREATE DATABASE \"vault\"");
        assert_eq!(drop_database_statement("vault"), "DROP DATABASE \"vault\"");
        // Embedded quotes are doubled, not allowed to terminate the identifier
        assert_eq!(
            create_database_statement("va\"ult"),
            "CREATE DATABASE \"va\"\"ult\""
        );
    }
}
