use crate::core::Ledger;
use crate::utils::error::Result;
use reqwest::Client;

/// HTTP client for the external attestation ledger: posts the participant's
/// name and nothing else. Callers treat the submission as fire-and-forget.
pub struct HttpLedger {
    endpoint: String,
    client: Client,
}

impl HttpLedger {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Ledger for HttpLedger {
    async fn submit_participant(&self, name: &str) -> Result<()> {
        tracing::debug!("submitting participant to ledger at {}", self.endpoint);

        self.client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("ledger accepted participant {}", name);
        Ok(())
    }
}
