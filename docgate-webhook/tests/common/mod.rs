//! Shared test helpers for webhook tests.

#![allow(dead_code)]

use async_trait::async_trait;
use docgate_types::EventName;
use docgate_webhook::{
    DeliveryRequest, EndpointSecret, TransportError, WebhookEndpoint, WebhookTransport,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

pub const SECRET: &str = "whsec_0123456789abcdef";

/// Installs a subscriber so `RUST_LOG=debug` surfaces dispatcher logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Returns an active HTTPS endpoint subscribed to the given events.
pub fn endpoint(events: &[EventName]) -> WebhookEndpoint {
    WebhookEndpoint::new(
        "https://example.com/hooks/docgate",
        EndpointSecret::from(SECRET),
        events.iter().cloned(),
    )
}

/// Transport that replays a script of outcomes and records every request.
pub struct MockTransport {
    script: Mutex<VecDeque<Result<(), String>>>,
    requests: Mutex<Vec<DeliveryRequest>>,
    instants: Mutex<Vec<Instant>>,
}

impl MockTransport {
    /// Outcomes are consumed front to back; an exhausted script succeeds.
    pub fn scripted(outcomes: impl IntoIterator<Item = Result<(), String>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            instants: Mutex::new(Vec::new()),
        }
    }

    /// Transport that accepts everything.
    pub fn succeeding() -> Self {
        Self::scripted([])
    }

    /// Transport that refuses more attempts than any policy permits.
    pub fn failing() -> Self {
        Self::scripted(
            std::iter::repeat_with(|| Err("connection refused".to_string())).take(64),
        )
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<DeliveryRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Virtual instants at which attempts arrived.
    pub fn instants(&self) -> Vec<Instant> {
        self.instants.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for MockTransport {
    async fn deliver(&self, request: &DeliveryRequest) -> Result<(), TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.instants.lock().unwrap().push(Instant::now());
        let outcome = self.script.lock().unwrap().pop_front().unwrap_or(Ok(()));
        outcome.map_err(TransportError::new)
    }
}
