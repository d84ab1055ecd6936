//! Data access layer: the seal backend over HTTP, or the simulated one.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::mock::MockBackend;
use crate::model::{Pool, SealData};

/// Body of `POST /stopInstances`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceChange {
    pub application_id: String,
    pub pool_ids: Vec<String>,
    pub count: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SealQuery<'a> {
    seal_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PoolQuery<'a> {
    application_id: &'a str,
}

/// Client for the seal backend's HTTP API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /getapp`
    pub async fn fetch_applications(&self, seal_id: &str) -> Result<SealData> {
        let resp = self.post("getapp", &SealQuery { seal_id }).await?;
        Ok(resp.json::<SealData>().await?)
    }

    /// `POST /getpools`
    pub async fn fetch_pools(&self, application_id: &str) -> Result<Vec<Pool>> {
        let resp = self.post("getpools", &PoolQuery { application_id }).await?;
        Ok(resp.json::<Vec<Pool>>().await?)
    }

    /// `POST /stopInstances`. Success carries no body.
    pub async fn request_instance_change(&self, change: &InstanceChange) -> Result<()> {
        self.post("stopInstances", change).await?;
        Ok(())
    }

    /// Send one JSON request; non-2xx turns into a network error carrying the body text.
    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "POST");
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| DashboardError::transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        warn!(url = %url, status = %status, "Backend returned non-success status");
        Err(DashboardError::http(status.as_u16(), text.trim()))
    }
}

/// The backend the dashboard talks to.
#[derive(Clone)]
pub enum Backend {
    Http(HttpBackend),
    Mock(MockBackend),
}

impl Backend {
    pub fn describe(&self) -> String {
        match self {
            Backend::Http(h) => h.base_url().to_string(),
            Backend::Mock(_) => "simulated".to_string(),
        }
    }

    pub async fn fetch_applications(&self, seal_id: &str) -> Result<SealData> {
        match self {
            Backend::Http(h) => h.fetch_applications(seal_id).await,
            Backend::Mock(m) => m.fetch_applications(seal_id).await,
        }
    }

    pub async fn fetch_pools(&self, application_id: &str) -> Result<Vec<Pool>> {
        match self {
            Backend::Http(h) => h.fetch_pools(application_id).await,
            Backend::Mock(m) => m.fetch_pools(application_id).await,
        }
    }

    pub async fn request_instance_change(&self, change: &InstanceChange) -> Result<()> {
        match self {
            Backend::Http(h) => h.request_instance_change(change).await,
            Backend::Mock(m) => m.request_instance_change(change).await,
        }
    }
}
