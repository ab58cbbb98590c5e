//! reqwest-based robot API client

use crate::client::RobotApi;
use crate::types::{HealthStatus, SystemStats, WifiRequest, WifiStatus};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const SAVE_FAILED: &str = "Failed to save";
const CLEAR_FAILED: &str = "Failed to clear";
const LOAD_WIFI_FAILED: &str = "Failed to load Wi-Fi status";
const LOAD_STATS_FAILED: &str = "Failed to load stats";
const HEALTH_FAILED: &str = "Health check failed";

/// Robot API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpRobotApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpRobotApi {
    /// Create a client for the resolved API base (e.g. `http://robot:8082/api`)
    pub fn new(base: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a resource below the API base, keeping the base path
    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        endpoint_url(&self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> anyhow::Result<T> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let response = check_status(response, fallback).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid response from {}", url))
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> anyhow::Result<()> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        check_status(response, fallback).await?;
        Ok(())
    }
}

#[async_trait]
impl RobotApi for HttpRobotApi {
    async fn health(&self) -> anyhow::Result<HealthStatus> {
        self.get_json("health", HEALTH_FAILED).await
    }

    async fn fetch_wifi(&self) -> anyhow::Result<WifiStatus> {
        self.get_json("wifi", LOAD_WIFI_FAILED).await
    }

    async fn save_wifi(&self, request: &WifiRequest) -> anyhow::Result<()> {
        self.post("wifi", Some(request), SAVE_FAILED).await
    }

    async fn clear_wifi(&self) -> anyhow::Result<()> {
        self.post::<()>("wifi/clear", None, CLEAR_FAILED).await
    }

    async fn fetch_stats(&self) -> anyhow::Result<SystemStats> {
        self.get_json("stats", LOAD_STATS_FAILED).await
    }
}

/// Turn a non-2xx response into an error carrying the body text
async fn check_status(response: reqwest::Response, fallback: &str) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("Request failed with {}: {}", status, body);
    Err(anyhow!(error_message(&body, fallback)))
}

/// Body text of a failed response, or `fallback` when there is none
pub fn error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn endpoint_url(base: &Url, path: &str) -> anyhow::Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).with_context(|| format!("Invalid API URL '{}'", joined))
}
