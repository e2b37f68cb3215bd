//! Exactly-once completion of a bridge invocation.

use futures::channel::oneshot;
use serde::Serialize;

use crate::analytics::error::{internal_error, AnalyticsError};

/// Terminal response delivered back to the JavaScript caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BridgeResponse {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<String>,
    },
    Error {
        message: String,
    },
}

impl BridgeResponse {
    pub fn ok() -> Self {
        BridgeResponse::Success { payload: None }
    }

    pub fn ok_with(payload: impl Into<String>) -> Self {
        BridgeResponse::Success {
            payload: Some(payload.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        BridgeResponse::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BridgeResponse::Success { .. })
    }

    pub fn payload(&self) -> Option<&str> {
        match self {
            BridgeResponse::Success { payload } => payload.as_deref(),
            BridgeResponse::Error { .. } => None,
        }
    }
}

impl From<AnalyticsError> for BridgeResponse {
    fn from(err: AnalyticsError) -> Self {
        BridgeResponse::error(err.message())
    }
}

/// Handle a method implementation completes exactly once. Every completion consumes the
/// context, so a second response cannot be sent.
#[derive(Debug)]
pub struct CallbackContext {
    sender: oneshot::Sender<BridgeResponse>,
}

/// Receiving half paired with a [`CallbackContext`].
#[derive(Debug)]
pub struct PendingResponse {
    receiver: oneshot::Receiver<BridgeResponse>,
}

impl CallbackContext {
    pub fn new() -> (Self, PendingResponse) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, PendingResponse { receiver })
    }

    pub fn success(self) {
        self.send(BridgeResponse::ok());
    }

    pub fn success_with(self, payload: impl Into<String>) {
        self.send(BridgeResponse::ok_with(payload));
    }

    pub fn error(self, message: impl Into<String>) {
        self.send(BridgeResponse::error(message));
    }

    pub fn respond(self, response: BridgeResponse) {
        self.send(response);
    }

    fn send(self, response: BridgeResponse) {
        if self.sender.send(response).is_err() {
            log::debug!("bridge caller went away before the response was delivered");
        }
    }
}

impl PendingResponse {
    /// Waits for the terminal response. A context dropped without completing yields an error.
    pub async fn wait(self) -> BridgeResponse {
        self.receiver
            .await
            .unwrap_or_else(|_| internal_error("Native call completed without a response").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(flavor = "current_thread")]
    async fn delivers_success_payload() {
        let (context, pending) = CallbackContext::new();
        context.success_with("null");
        let response = pending.wait().await;
        assert!(response.is_success());
        assert_eq!(response.payload(), Some("null"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn dropped_context_surfaces_as_error() {
        let (context, pending) = CallbackContext::new();
        drop(context);
        assert_eq!(
            pending.wait().await,
            BridgeResponse::error("Native call completed without a response")
        );
    }

    #[test]
    fn responding_after_receiver_dropped_is_harmless() {
        let (context, pending) = CallbackContext::new();
        drop(pending);
        context.error("too late");
    }

    #[test]
    fn wire_shape() {
        assert_eq!(serde_json::to_value(BridgeResponse::ok()).unwrap(), json!({"status": "success"}));
        assert_eq!(
            serde_json::to_value(BridgeResponse::ok_with("42")).unwrap(),
            json!({"status": "success", "payload": "42"})
        );
        assert_eq!(
            serde_json::to_value(BridgeResponse::error("boom")).unwrap(),
            json!({"status": "error", "message": "boom"})
        );
    }
}
