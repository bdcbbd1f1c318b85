//! Delivery transport abstraction.

use crate::delivery::DeliveryRequest;
use async_trait::async_trait;
use thiserror::Error;

/// A transport-level failure for one attempt.
///
/// Recorded as a message on the attempt's audit entry; the dispatcher
/// decides whether another attempt runs.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Creates an error from any displayable cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Sends prepared requests to endpoint URLs.
///
/// Implementations decide what counts as success (for HTTP, a 2xx
/// response). The dispatcher owns retries; transports must not retry
/// internally.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Sends one request. Any `Err` counts as a failed attempt.
    async fn deliver(&self, request: &DeliveryRequest) -> Result<(), TransportError>;
}

#[cfg(feature = "http")]
mod http {
    use super::{TransportError, WebhookTransport};
    use crate::delivery::DeliveryRequest;
    use async_trait::async_trait;
    use std::time::Duration;

    /// `reqwest`-backed transport treating any 2xx response as success.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
    }

    impl HttpTransport {
        /// Creates a transport with a bounded per-request timeout.
        ///
        /// # Errors
        ///
        /// Returns an error if the underlying client cannot be built.
        pub fn new(request_timeout: Duration) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(request_timeout)
                .build()
                .map_err(|e| TransportError::new(format!("http client: {e}")))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl WebhookTransport for HttpTransport {
        async fn deliver(&self, request: &DeliveryRequest) -> Result<(), TransportError> {
            let mut post = self
                .client
                .post(&request.url)
                .header("Content-Type", "application/json");
            for (name, value) in &request.headers {
                post = post.header(name, value);
            }

            let response = post
                .body(request.payload.clone())
                .send()
                .await
                .map_err(|e| TransportError::new(format!("send: {e}")))?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(TransportError::new(format!("endpoint returned {status}")))
            }
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpTransport;
