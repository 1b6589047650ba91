//! HTTP client for a MyMazda JSON gateway.

use async_trait::async_trait;
use mazda_core::{Credentials, Region, VehicleId};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::api::VehicleApi;
use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Session against the gateway. Every request carries the account
/// credentials and region; the gateway handles the upstream protocol.
pub struct MazdaClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) region: Region,
    pub(crate) closed: AtomicBool,
}

#[derive(Debug, Serialize)]
struct PoiRequest<'a> {
    latitude: f64,
    longitude: f64,
    name: &'a str,
}

impl MazdaClient {
    /// Create a new client. Nothing is sent until the first call.
    pub fn new(
        credentials: Credentials,
        region: Region,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            region,
            closed: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        if self.is_closed() {
            return Err(ClientError::SessionClosed);
        }
        tracing::debug!(%method, path, region = %self.region, "gateway request");
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .client
            .request(method, url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.password))
            .header("X-Mazda-Region", self.region.code()))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status == StatusCode::NOT_IMPLEMENTED {
            return Err(ClientError::Unsupported(
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let body = self.send(self.request(Method::GET, path)?).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_command(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::POST, path)?).await?;
        Ok(())
    }
}

#[async_trait]
impl VehicleApi for MazdaClient {
    async fn get_vehicles(&self) -> Result<Vec<Value>> {
        let value = self.get_json("/vehicles").await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_vehicle_status(&self, vehicle_id: &VehicleId) -> Result<Value> {
        self.get_json(&format!("/vehicles/{}/status", vehicle_id))
            .await
    }

    async fn start_engine(&self, vehicle_id: &VehicleId) -> Result<()> {
        self.post_command(&format!("/vehicles/{}/engine/start", vehicle_id))
            .await
    }

    async fn stop_engine(&self, vehicle_id: &VehicleId) -> Result<()> {
        self.post_command(&format!("/vehicles/{}/engine/stop", vehicle_id))
            .await
    }

    async fn lock_doors(&self, vehicle_id: &VehicleId) -> Result<()> {
        self.post_command(&format!("/vehicles/{}/doors/lock", vehicle_id))
            .await
    }

    async fn unlock_doors(&self, vehicle_id: &VehicleId) -> Result<()> {
        self.post_command(&format!("/vehicles/{}/doors/unlock", vehicle_id))
            .await
    }

    async fn send_poi(
        &self,
        vehicle_id: &VehicleId,
        latitude: f64,
        longitude: f64,
        name: &str,
    ) -> Result<Value> {
        let builder = self
            .request(Method::POST, &format!("/vehicles/{}/poi", vehicle_id))?
            .json(&PoiRequest {
                latitude,
                longitude,
                name,
            });
        let body = self.send(builder).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn close(&self) -> Result<()> {
        // Basic-auth sessions hold no server-side state; closing only
        // fences off further calls.
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("session closed");
        }
        Ok(())
    }
}
