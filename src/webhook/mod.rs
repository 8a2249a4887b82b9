/// Webhook module for AZbot
///
/// Everything that crosses the wire lives here: the request/response shapes,
/// the reply normalization, and the HTTP transport that posts a conversation
/// to the fixed endpoint.
///
/// # Architecture
///
/// - `wire` - JSON payloads and the mapping from [`Message`](crate::types::Message)
/// - `client` - the [`Transport`] seam and its reqwest implementation
///
/// # Usage
///
/// ```rust,no_run
/// use azbot::types::{Message, Origin};
/// use azbot::webhook::{WebhookClient, exchange};
///
/// # async fn example() -> Result<(), azbot::webhook::ExchangeError> {
/// let client = WebhookClient::new();
/// let history = vec![Message::new(Origin::User, "Xin chào", Vec::new())];
/// let reply = exchange(&client, &history).await?;
/// # Ok(())
/// # }
/// ```
mod client;
mod wire;

pub use client::{ExchangeError, ExchangeResult, Transport, WEBHOOK_URL, WebhookClient, exchange};
pub use wire::{
    ExchangeRequest, ExchangeResponse, WireMessage, WireType, normalize_reply, reply_message,
};
