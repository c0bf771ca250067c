//! HTTP implementation of the alert publisher.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::alerts::publisher::AlertPublisher;
use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::report::model::ReportRecord;

/// Publishes records as JSON messages to an HTTP queue endpoint.
pub struct HttpQueuePublisher {
    client: reqwest::Client,
    config: QueueConfig,
}

/// Queue acknowledgement body. Some queue frontends return a message id,
/// some return an empty body.
#[derive(Debug, Deserialize)]
struct QueueAck {
    #[serde(default)]
    message_id: Option<String>,
}

impl HttpQueuePublisher {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl AlertPublisher for HttpQueuePublisher {
    fn name(&self) -> &str {
        "http-queue"
    }

    async fn publish(&self, report: &ReportRecord) -> Result<String, QueueError> {
        let body = serde_json::to_value(report)?;

        let mut request = self
            .client
            .post(&self.config.url)
            .timeout(self.config.timeout)
            .json(&body);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| QueueError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueueError::Status {
                status: status.as_u16(),
            });
        }

        // Missing or unparsable ack body is fine; generate an id locally so
        // callers always have one to log.
        let message_id = response
            .json::<QueueAck>()
            .await
            .ok()
            .and_then(|ack| ack.message_id)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        debug!(queue_url = %self.config.url, %message_id, "Published report to alert queue");
        Ok(message_id)
    }
}
