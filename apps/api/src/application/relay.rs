/// Mail relay — the only code that talks to the transactional email service.
///
/// Any 2xx response is a delivery. Sends are never retried automatically:
/// there is no idempotency key, so a retry after a lost response could
/// deliver the same notification twice.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::encoding::EncodedAttachment;
use crate::application::error::SubmissionError;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAttachment {
    pub filename: String,
    /// Base64.
    pub content: String,
    pub content_type: String,
}

impl From<EncodedAttachment> for EmailAttachment {
    fn from(encoded: EncodedAttachment) -> Self {
        EmailAttachment {
            filename: encoded.filename,
            content: encoded.content,
            content_type: encoded.content_type,
        }
    }
}

/// Body of `POST {MAIL_RELAY_URL}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
}

/// Outcome of a delivery the relay accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayReceipt {
    /// Relay-assigned id, when the response carried one.
    pub message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Delivery seam. `AppState` holds an `Arc<dyn MailRelay>` so tests can
/// substitute a recording relay.
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, payload: &EmailPayload) -> Result<RelayReceipt, SubmissionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP relay
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpMailRelay {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpMailRelay {
    pub fn new(url: String, api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
            api_key,
        })
    }
}

fn map_transport_error(err: reqwest::Error) -> SubmissionError {
    if err.is_timeout() {
        SubmissionError::Timeout
    } else {
        SubmissionError::NetworkFailure(err.to_string())
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn send(&self, payload: &EmailPayload) -> Result<RelayReceipt, SubmissionError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            warn!("Mail relay returned {}: {}", status, body);
            let message = serde_json::from_str::<RelayErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(SubmissionError::ServerRejected {
                status: status.as_u16(),
                message,
            });
        }

        // 2xx is a delivery even when the body is not the JSON we expect.
        let message_id = serde_json::from_str::<RelayResponse>(&body)
            .ok()
            .and_then(|r| r.id);

        info!(
            recipients = payload.to.len(),
            attachments = payload.attachments.len(),
            message_id = message_id.as_deref().unwrap_or("-"),
            "Notification accepted by mail relay"
        );

        Ok(RelayReceipt { message_id })
    }
}
