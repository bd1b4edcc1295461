//! Managed address-list lookup handler

use async_trait::async_trait;
use warden_models::{
    AddressListData, AddressListProperties, AddressListRecord, LifecycleEvent, LookupOutcome,
    RequestType,
};

use crate::error::LookupError;

pub type AddressListEvent = LifecycleEvent<AddressListProperties>;

/// Read access to the inventory of externally managed address lists
#[async_trait]
pub trait AddressListInventory: Send + Sync {
    /// List every managed address list known to the inventory
    async fn list(&self) -> Result<Vec<AddressListRecord>, LookupError>;
}

/// Inventory service reached over HTTP
pub struct HttpInventory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AddressListInventory for HttpInventory {
    async fn list(&self) -> Result<Vec<AddressListRecord>, LookupError> {
        let url = format!("{}/v1/address-lists", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Api(format!(
                "inventory answered {}",
                response.status()
            )));
        }

        response
            .json::<Vec<AddressListRecord>>()
            .await
            .map_err(|e| LookupError::Api(format!("malformed inventory response: {}", e)))
    }
}

/// Resolve a lookup event to a synchronous result-or-failure
///
/// Create and Update both mean "find the named list". Delete resolves to an
/// empty outcome: this handler is read-only and never created the object it
/// describes, so there is nothing to undo.
pub async fn handle_lookup(
    inventory: &dyn AddressListInventory,
    event: &AddressListEvent,
) -> Result<LookupOutcome, LookupError> {
    let name = &event.resource_properties.address_list_name;

    match event.request_type {
        RequestType::Delete => Ok(LookupOutcome::empty()),
        RequestType::Create | RequestType::Update => {
            let lists = inventory.list().await?;
            let found = lists
                .into_iter()
                .find(|list| list.name == *name)
                .ok_or_else(|| LookupError::NotFound(name.clone()))?;

            tracing::info!(name = %found.name, id = %found.id, "address list resolved");

            Ok(LookupOutcome {
                physical_resource_id: Some(found.id.clone()),
                data: Some(AddressListData {
                    name: found.name,
                    id: found.id,
                }),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticInventory(Vec<AddressListRecord>);

    #[async_trait]
    impl AddressListInventory for StaticInventory {
        async fn list(&self) -> Result<Vec<AddressListRecord>, LookupError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenInventory;

    #[async_trait]
    impl AddressListInventory for BrokenInventory {
        async fn list(&self) -> Result<Vec<AddressListRecord>, LookupError> {
            Err(LookupError::Api("inventory unreachable".to_string()))
        }
    }

    fn event(request_type: RequestType, name: &str) -> AddressListEvent {
        LifecycleEvent {
            request_type,
            request_id: "req-1".to_string(),
            stack_id: "stack-1".to_string(),
            logical_resource_id: "EdgeAllowList".to_string(),
            response_url: "http://callbacks.internal/req-1".to_string(),
            resource_properties: AddressListProperties {
                address_list_name: name.to_string(),
            },
            old_resource_properties: None,
        }
    }

    fn inventory() -> StaticInventory {
        StaticInventory(vec![
            AddressListRecord {
                id: "al-0abc".to_string(),
                name: "edge-allow-list".to_string(),
                cidrs: vec!["10.0.0.0/8".to_string()],
            },
            AddressListRecord {
                id: "al-0def".to_string(),
                name: "office-ranges".to_string(),
                cidrs: vec![],
            },
        ])
    }

    #[tokio::test]
    async fn test_create_resolves_matching_list() {
        let outcome = handle_lookup(&inventory(), &event(RequestType::Create, "edge-allow-list"))
            .await
            .unwrap();
        assert_eq!(outcome.physical_resource_id.as_deref(), Some("al-0abc"));
        let data = outcome.data.unwrap();
        assert_eq!(data.name, "edge-allow-list");
        assert_eq!(data.id, "al-0abc");
    }

    #[tokio::test]
    async fn test_update_resolves_like_create() {
        let outcome = handle_lookup(&inventory(), &event(RequestType::Update, "office-ranges"))
            .await
            .unwrap();
        assert_eq!(outcome.physical_resource_id.as_deref(), Some("al-0def"));
    }

    #[tokio::test]
    async fn test_unknown_name_fails_with_not_found() {
        let err = handle_lookup(&inventory(), &event(RequestType::Create, "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::NotFound(name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_delete_is_a_remote_no_op() {
        // BrokenInventory proves delete never touches the inventory API
        let outcome = handle_lookup(&BrokenInventory, &event(RequestType::Delete, "edge-allow-list"))
            .await
            .unwrap();
        assert_eq!(outcome, LookupOutcome::empty());
    }
}
