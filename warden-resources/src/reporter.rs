//! Terminal response delivery to the orchestrator's callback address

use warden_models::ResponseEnvelope;

use crate::error::CallbackDeliveryError;

/// Posts the single terminal report of an invocation
///
/// Delivery is attempted exactly once; the orchestrator owns retries by
/// re-issuing the whole lifecycle event.
#[derive(Debug, Clone, Default)]
pub struct ResponseReporter {
    client: reqwest::Client,
}

impl ResponseReporter {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// POST the envelope as JSON to the callback address
    pub async fn report(
        &self,
        url: &str,
        envelope: &ResponseEnvelope,
    ) -> Result<(), CallbackDeliveryError> {
        let response = self
            .client
            .post(url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| CallbackDeliveryError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CallbackDeliveryError::Rejected {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(%url, status = ?envelope.status, "terminal response delivered");
        Ok(())
    }
}
