//! Typed HTTP client for the gateway.
//!
//! Portal views reach the gateway only through [`GatewayClient`]. Error
//! bodies (`{"error": ...}`) and other non-2xx answers surface as
//! [`ClientError::Gateway`].

use pinnacle_types::{
    Ack, AskRequest, AskResponse, ErrorBody, ForensicsEventRequest, ReconKind, ReconEventRequest,
    StatsReport,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

/// Client for one gateway deployment.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a client for the gateway at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The gateway base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat prompt and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Gateway`] with `Missing prompt` for a blank
    /// prompt and `AI Request Failed` when the provider call failed.
    pub async fn ask(&self, prompt: &str) -> Result<String, ClientError> {
        let body = AskRequest {
            prompt: Some(prompt.to_owned()),
        };
        let reply: AskResponse = self.post("/ai", &body).await?;
        Ok(reply.response)
    }

    /// Fetch the admin usage counters.
    pub async fn admin_stats(&self) -> Result<StatsReport, ClientError> {
        let response = self
            .http
            .get(format!("{}/admin/stats", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    /// Report a recon run.
    pub async fn recon_event(&self, query: &str, kind: ReconKind) -> Result<(), ClientError> {
        let body = ReconEventRequest {
            query: Some(query.to_owned()),
            kind,
        };
        let _: Ack = self.post("/recon/event", &body).await?;
        Ok(())
    }

    /// Report a forensics analysis.
    pub async fn forensics_event(&self, artifact: &str) -> Result<(), ClientError> {
        let body = ForensicsEventRequest {
            artifact: Some(artifact.to_owned()),
        };
        let _: Ack = self.post("/forensics/event", &body).await?;
        Ok(())
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(path, "gateway request");
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a 2xx body as `T`; turn anything else into [`ClientError::Gateway`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error);
    Err(ClientError::Gateway {
        status: status.as_u16(),
        message,
    })
}
