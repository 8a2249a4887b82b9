use super::wire::{ExchangeRequest, ExchangeResponse, reply_message};
use crate::types::Message;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Fixed webhook endpoint. Not configurable at runtime.
pub const WEBHOOK_URL: &str =
    "https://n8n.aibus.dev/webhook/clone-test-model/0047a97b-8db7-4cf5-9dc5-83abc171e8ae";

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;

// ============================================
// Transport
// ============================================

/// Posts one conversation and returns the decoded reply body.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport {
    async fn post(&self, request: &ExchangeRequest) -> ExchangeResult<ExchangeResponse>;
}

/// reqwest-backed transport for [`WEBHOOK_URL`]. No timeout is set.
#[derive(Clone, Default)]
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for WebhookClient {
    async fn post(&self, request: &ExchangeRequest) -> ExchangeResult<ExchangeResponse> {
        let response = self.client.post(WEBHOOK_URL).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(ExchangeError::Status { status, body })
        }
    }
}

/// Sends the full history and builds the remote reply, if any.
///
/// `Ok(None)` means the webhook answered 2xx without usable `content`.
pub async fn exchange<T>(transport: &T, history: &[Message]) -> ExchangeResult<Option<Message>>
where
    T: Transport + ?Sized,
{
    let request = ExchangeRequest::from_history(history);
    tracing::debug!(messages = request.messages.len(), "posting conversation to webhook");
    let response = transport.post(&request).await?;
    Ok(reply_message(response))
}
