use anyhow::Result;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use warden_models::{AddressListProperties, DatabaseProperties, LifecycleEvent, ResponseEnvelope};
use warden_resources::{
    address_list::handle_lookup, database::handle_database_event, AddressListInventory,
    DatabaseAdmin, ResponseReporter, SecretStore,
};

/// Shared API state: the handler seams plus the secret reference the
/// database path resolves credentials through
#[derive(Clone)]
pub struct AppState {
    pub admin: Arc<dyn DatabaseAdmin>,
    pub secrets: Arc<dyn SecretStore>,
    pub inventory: Arc<dyn AddressListInventory>,
    pub reporter: Arc<ResponseReporter>,
    pub db_secret_ref: String,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/v1/resources/database", post(invoke_database))
        .route("/v1/resources/address-list", post(invoke_address_list))
        .layer(cors)
        .with_state(state)
}

/// Start the API server
pub async fn start_server(host: &str, port: u16, state: AppState) -> Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("✓ API server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

// ============================================================================
// Health Check
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "warden",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============================================================================
// Database lifecycle
// ============================================================================

async fn invoke_database(
    State(state): State<AppState>,
    Json(event): Json<LifecycleEvent<DatabaseProperties>>,
) -> Json<ResponseEnvelope> {
    let invocation = Uuid::new_v4();
    tracing::info!(
        %invocation,
        request_id = %event.request_id,
        request_type = ?event.request_type,
        database = %event.resource_properties.database_name,
        "database lifecycle event received"
    );

    // The handler owns the callback step on this path; the envelope comes
    // back for the caller's benefit only.
    let envelope = handle_database_event(
        state.admin.as_ref(),
        state.secrets.as_ref(),
        &state.reporter,
        &state.db_secret_ref,
        &event,
    )
    .await;

    Json(envelope)
}

// ============================================================================
// Address-list lookup
// ============================================================================

async fn invoke_address_list(
    State(state): State<AppState>,
    Json(event): Json<LifecycleEvent<AddressListProperties>>,
) -> Json<ResponseEnvelope> {
    let invocation = Uuid::new_v4();
    let name = event.resource_properties.address_list_name.clone();
    tracing::info!(
        %invocation,
        request_id = %event.request_id,
        request_type = ?event.request_type,
        address_list = %name,
        "address-list lookup event received"
    );

    // The lookup contract is synchronous result-or-failure; this route owns
    // the callback step.
    let envelope = match handle_lookup(state.inventory.as_ref(), &event).await {
        Ok(outcome) => {
            let physical_id = outcome
                .physical_resource_id
                .unwrap_or_else(|| name.clone());
            let mut envelope = event.success_envelope(physical_id);
            envelope.data = outcome.data.and_then(|d| serde_json::to_value(d).ok());
            envelope
        }
        Err(e) => {
            tracing::error!(error = %e, address_list = %name, "lookup failed");
            event.failure_envelope(name, e.to_string())
        }
    };

    if let Err(e) = state.reporter.report(&event.response_url, &envelope).await {
        tracing::error!(error = %e, request_id = %event.request_id, "terminal response was not delivered");
    }

    Json(envelope)
}
