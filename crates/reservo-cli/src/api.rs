//! Reservo API Client

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// API Client for Reservo
pub struct ReservoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ReservoClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Get a reservation
    pub async fn get(&self, id: i64) -> Result<ReservationResponse> {
        let req = self.client.get(self.url(&format!("/reservations/{}", id)));
        self.send_json(req).await
    }

    /// Search reservations
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ReservationResponse>> {
        let req = self.client.get(self.url("/reservations")).query(query);
        self.send_json(req).await
    }

    /// Create a reservation
    pub async fn create(&self, body: &ReservationRequest) -> Result<ReservationResponse> {
        let req = self.client.post(self.url("/reservations")).json(body);
        self.send_json(req).await
    }

    /// Update a pending reservation
    pub async fn update(&self, id: i64, body: &ReservationRequest) -> Result<ReservationResponse> {
        let req = self
            .client
            .put(self.url(&format!("/reservations/{}", id)))
            .json(body);
        self.send_json(req).await
    }

    /// Approve a pending reservation
    pub async fn approve(&self, id: i64) -> Result<ReservationResponse> {
        let req = self
            .client
            .post(self.url(&format!("/reservations/{}/approve", id)));
        self.send_json(req).await
    }

    /// Cancel a pending reservation
    pub async fn cancel(&self, id: i64) -> Result<()> {
        let req = self
            .client
            .delete(self.url(&format!("/reservations/{}/cancel", id)));
        self.send(req).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let req = match &self.api_key {
            Some(key) => req.header("Authorization", format!("Bearer {}", key)),
            None => req,
        };

        let resp = req
            .send()
            .await
            .context("Failed to connect to Reservo API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => bail!("API error ({}, {}): {}", status, err.error, err.message),
                Err(_) => bail!("API error ({}): {}", status, body),
            }
        }

        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = self.send(req).await?;
        resp.json().await.context("Failed to parse response")
    }
}
