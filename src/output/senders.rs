use async_trait::async_trait;
use log::info;
use std::time::Duration;

use crate::utils::error::PollError;

#[async_trait]
pub trait DataSender: Send + Sync {
    async fn send(&self, payload: &str) -> Result<(), PollError>;
    fn sender_type(&self) -> &str;
    fn destination(&self) -> &str;
}

pub struct ConsoleSender;

#[async_trait]
impl DataSender for ConsoleSender {
    async fn send(&self, payload: &str) -> Result<(), PollError> {
        println!("{}", payload);
        Ok(())
    }

    fn sender_type(&self) -> &str {
        "console"
    }

    fn destination(&self) -> &str {
        "stdout"
    }
}

/// Best-effort JSON POST to the collection endpoint. A single bounded
/// attempt per snapshot; failed deliveries are dropped, never queued.
pub struct HttpSender {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSender {
    pub fn new(endpoint: String, timeout_seconds: u64) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

#[async_trait]
impl DataSender for HttpSender {
    async fn send(&self, payload: &str) -> Result<(), PollError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PollError::Delivery(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PollError::Delivery(format!("HTTP {}: {}", status, body)));
        }

        info!("📡 Snapshot delivered to {} ({})", self.endpoint, status);
        Ok(())
    }

    fn sender_type(&self) -> &str {
        "http"
    }

    fn destination(&self) -> &str {
        &self.endpoint
    }
}
