use serde::{Deserialize, Serialize};

/// Lifecycle operation requested by the deployment orchestrator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// A lifecycle event delivered by the orchestrator, generic over the
/// resource-specific property bag
///
/// The orchestrator delivers at-least-once: the same event may arrive again
/// after a transient failure, so handlers must tolerate replays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent<P> {
    pub request_type: RequestType,
    pub request_id: String,
    pub stack_id: String,
    pub logical_resource_id: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub resource_properties: P,
    /// Present on Update only; carries the properties being replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<P>,
}

impl<P> LifecycleEvent<P> {
    /// Build a SUCCESS envelope echoing this event's correlation fields
    pub fn success_envelope(&self, physical_resource_id: impl Into<String>) -> ResponseEnvelope {
        ResponseEnvelope {
            status: ResponseStatus::Success,
            reason: None,
            physical_resource_id: physical_resource_id.into(),
            stack_id: self.stack_id.clone(),
            request_id: self.request_id.clone(),
            logical_resource_id: self.logical_resource_id.clone(),
            data: None,
        }
    }

    /// Build a FAILED envelope echoing this event's correlation fields
    pub fn failure_envelope(
        &self,
        physical_resource_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> ResponseEnvelope {
        ResponseEnvelope {
            status: ResponseStatus::Failed,
            reason: Some(reason.into()),
            physical_resource_id: physical_resource_id.into(),
            stack_id: self.stack_id.clone(),
            request_id: self.request_id.clone(),
            logical_resource_id: self.logical_resource_id.clone(),
            data: None,
        }
    }
}

/// Terminal status reported back to the orchestrator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// The single terminal report delivered to the event's callback address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    /// Resource attributes surfaced to the template (lookup path only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Properties of a logical-database lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseProperties {
    pub database_name: String,
}

/// Properties of a managed address-list lookup event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AddressListProperties {
    pub address_list_name: String,
}

/// Connection secret payload as stored in the secret store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseSecret {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
}

/// One managed address list as returned by the inventory API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressListRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cidrs: Vec<String>,
}

/// Result of a managed address-list lookup
///
/// Delete events resolve to an empty outcome: the lookup never created the
/// object it describes, so there is nothing to undo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupOutcome {
    pub physical_resource_id: Option<String>,
    pub data: Option<AddressListData>,
}

impl LookupOutcome {
    pub fn empty() -> Self {
        Self {
            physical_resource_id: None,
            data: None,
        }
    }
}

/// Attributes of a resolved address list, in the orchestrator's wire casing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AddressListData {
    pub name: String,
    pub id: String,
}
