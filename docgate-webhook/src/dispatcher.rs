//! Ordered delivery attempts with exponential backoff.

use crate::backoff::RetryPolicy;
use crate::delivery::{
    DeliveryRequest, WebhookDelivery, HEADER_EVENT, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
use crate::endpoint::WebhookEndpoint;
use crate::error::{WebhookError, WebhookResult};
use crate::signer;
use crate::transport::WebhookTransport;
use docgate_types::{Clock, EventName, SystemClock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Drives webhook deliveries.
///
/// Attempts for one delivery run strictly in order: the initial attempt
/// immediately, then each retry after its backoff delay, and attempt N+1
/// never starts before N's outcome is recorded. Deliveries to different
/// endpoints are independent; the dispatcher takes `&self` and callers
/// may run them concurrently.
pub struct WebhookDispatcher {
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
}

impl WebhookDispatcher {
    /// Creates a dispatcher reading time from the system clock.
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates a dispatcher with an injected clock.
    #[must_use]
    pub fn with_clock(policy: RetryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self { policy, clock }
    }

    /// Returns the retry policy in force.
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Signs a payload for an endpoint and builds the delivery records.
    ///
    /// Nothing is sent here. The timestamp header is stamped from the
    /// injected clock at preparation time.
    ///
    /// # Errors
    ///
    /// Rejects non-HTTPS destinations, inactive endpoints, and events the
    /// endpoint does not subscribe to.
    pub fn prepare(
        &self,
        endpoint: &WebhookEndpoint,
        event: &EventName,
        payload: &[u8],
    ) -> WebhookResult<(WebhookDelivery, DeliveryRequest)> {
        if !endpoint.is_https() {
            return Err(WebhookError::InsecureUrl(endpoint.url.clone()));
        }
        if !endpoint.active {
            return Err(WebhookError::InactiveEndpoint);
        }
        if !endpoint.subscribes_to(event) {
            return Err(WebhookError::NotSubscribed(event.clone()));
        }

        let signature = signer::sign(payload, endpoint.secret.as_bytes());
        let delivery = WebhookDelivery::new(
            endpoint.id,
            event.clone(),
            payload.to_vec(),
            signature.clone(),
        );
        let request = DeliveryRequest {
            url: endpoint.url.clone(),
            headers: vec![
                (HEADER_EVENT.to_string(), event.as_str().to_string()),
                (HEADER_SIGNATURE.to_string(), signature),
                (
                    HEADER_TIMESTAMP.to_string(),
                    self.clock.now_unix().to_string(),
                ),
            ],
            payload: payload.to_vec(),
        };

        Ok((delivery, request))
    }

    /// Delivers an event to one endpoint, retrying per the policy.
    ///
    /// A success marks the delivery `Delivered`. Exhausting every attempt
    /// marks it `Failed`, which is reported through the log and returned
    /// as a value for the audit trail, never as an `Err`.
    ///
    /// # Errors
    ///
    /// Only the `prepare` precondition violations.
    pub async fn dispatch(
        &self,
        endpoint: &WebhookEndpoint,
        event: &EventName,
        payload: &[u8],
        transport: &dyn WebhookTransport,
    ) -> WebhookResult<WebhookDelivery> {
        let (mut delivery, request) = self.prepare(endpoint, event, payload)?;

        for retry in 0..=self.policy.max_retries {
            let delay = self.policy.delay_for_retry(retry);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match transport.deliver(&request).await {
                Ok(()) => {
                    delivery.record_attempt(self.clock.now_unix(), None);
                    delivery.mark_delivered();
                    info!(
                        endpoint_id = %endpoint.id,
                        event = %event,
                        attempt = delivery.attempt,
                        "webhook delivered"
                    );
                    return Ok(delivery);
                }
                Err(err) => {
                    delivery.record_attempt(self.clock.now_unix(), Some(err.to_string()));
                    debug!(
                        endpoint_id = %endpoint.id,
                        event = %event,
                        attempt = delivery.attempt,
                        error = %err,
                        "webhook attempt failed"
                    );
                }
            }
        }

        delivery.mark_failed();
        error!(
            endpoint_id = %endpoint.id,
            event = %event,
            attempts = delivery.attempt,
            "webhook delivery failed permanently"
        );
        Ok(delivery)
    }
}

impl fmt::Debug for WebhookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookDispatcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
