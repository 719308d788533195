//! HubSpot CRM v3 objects API client.
//!
//! Talks to `{base}/crm/v3/objects/{objectTypeId}` with a private app token.
//! No retries and no client-side timeout: a call either completes or fails
//! with whatever the transport reports.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use super::RecordStore;
use crate::config::GatewayConfig;
use crate::error::{CrmError, CrmResult};
use crate::record::{CreateRecordRequest, Record, RecordFields, RecordPage};

/// [`RecordStore`] backed by the HubSpot REST API.
pub struct HubSpotClient {
    endpoint: String,
    access_token: String,
    client: Client,
}

impl HubSpotClient {
    /// Create a client for the collection described by `config`.
    pub fn new(config: &GatewayConfig) -> CrmResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CrmError::Client)?;

        Ok(Self {
            endpoint: config.collection_endpoint(),
            access_token: config.access_token.clone(),
            client,
        })
    }

    /// Collection endpoint this client reads from and writes to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn network_error(&self, source: reqwest::Error) -> CrmError {
        CrmError::Network {
            url: self.endpoint.clone(),
            source,
        }
    }

    /// Turn any non-2xx response into [`CrmError::Status`], keeping the body
    /// for the log.
    async fn ensure_success(&self, resp: Response) -> CrmResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(CrmError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RecordStore for HubSpotClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn list_records(&self, properties: &[&str]) -> CrmResult<Vec<Record>> {
        debug!("listing custom object records");

        let resp = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "application/json")
            .query(&[("properties", properties.join(","))])
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let body = self
            .ensure_success(resp)
            .await?
            .bytes()
            .await
            .map_err(|e| self.network_error(e))?;

        let page: RecordPage =
            serde_json::from_slice(&body).map_err(|e| CrmError::Decode(e.to_string()))?;
        debug!(count = page.results.len(), "records fetched");
        Ok(page.results)
    }

    #[instrument(skip(self, record), fields(endpoint = %self.endpoint))]
    async fn create_record(&self, record: &RecordFields) -> CrmResult<()> {
        debug!("creating custom object record");

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&CreateRecordRequest { properties: record })
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        self.ensure_success(resp).await?;
        Ok(())
    }
}
