//! Upstream people API client.
//!
//! Thin reqwest wrapper over the external REST service the gateway fronts:
//! `GET/POST /peoples`, `GET/PUT/DELETE /peoples/:id`,
//! `POST /peoples/:id/restore`, and `DELETE /peoples/destroy_multiple`.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use people_form_core::config::GatewayConfig;
use people_form_core::model::{Person, PersonPayload};

/// How much of an upstream error body is kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 256;

/// Errors from upstream people API calls.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned 404 for the requested record
    #[error("record not found upstream")]
    NotFound,

    /// Upstream returned a non-success status
    #[error("upstream rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Client for the upstream people API.
pub struct PeopleClient {
    http: reqwest::Client,
    base_url: String,
}

impl PeopleClient {
    /// Creates a client with the configured base URL and call timeout.
    pub fn new(config: &GatewayConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: config.upstream_base().to_string(),
        })
    }

    /// Fetches all person records, deleted ones included.
    pub async fn list(&self) -> Result<Vec<Person>, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/peoples", self.base_url))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetches one person record by id.
    pub async fn get(&self, id: &str) -> Result<Person, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/peoples/{}", self.base_url, id))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Creates a person record; returns the upstream response body verbatim.
    pub async fn create(&self, payload: &PersonPayload) -> Result<serde_json::Value, UpstreamError> {
        debug!(first_name = payload.first_name.as_str(), "creating person upstream");
        let response = self
            .http
            .post(format!("{}/peoples", self.base_url))
            .json(payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        // Upstream usually echoes the created record; tolerate an empty body.
        Ok(response.json().await.unwrap_or(serde_json::Value::Null))
    }

    /// Updates a person record in place.
    pub async fn update(&self, id: &str, payload: &PersonPayload) -> Result<(), UpstreamError> {
        debug!(id, "updating person upstream");
        let response = self
            .http
            .put(format!("{}/peoples/{}", self.base_url, id))
            .json(payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Soft-deletes a person record.
    pub async fn soft_delete(&self, id: &str) -> Result<(), UpstreamError> {
        let response = self
            .http
            .delete(format!("{}/peoples/{}", self.base_url, id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Restores a soft-deleted person record.
    pub async fn restore(&self, id: &str) -> Result<(), UpstreamError> {
        let response = self
            .http
            .post(format!("{}/peoples/{}/restore", self.base_url, id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Soft-deletes several person records in one call.
    pub async fn destroy_multiple(&self, ids: &[String]) -> Result<(), UpstreamError> {
        let response = self
            .http
            .delete(format!("{}/peoples/destroy_multiple", self.base_url))
            .json(&json!({ "ids": ids }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Maps non-success statuses to errors, keeping a body snippet.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();
            return Err(UpstreamError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
