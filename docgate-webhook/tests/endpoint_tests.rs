//! Tests for endpoint registrations and signing secrets.

use docgate_types::EventName;
use docgate_webhook::{EndpointSecret, WebhookEndpoint};
use pretty_assertions::assert_eq;

mod common;

// ── EndpointSecret ───────────────────────────────────────────────────────────

#[test]
fn secret_exposes_raw_bytes() {
    let secret = EndpointSecret::new(vec![0x01, 0x02, 0x03]);
    assert_eq!(secret.as_bytes(), &[0x01, 0x02, 0x03]);
}

#[test]
fn secret_from_str_uses_utf8_bytes() {
    let secret = EndpointSecret::from("whsec_abc");
    assert_eq!(secret.as_bytes(), b"whsec_abc");
}

#[test]
fn secret_from_string_consumes_buffer() {
    let secret = EndpointSecret::from(String::from("whsec_xyz"));
    assert_eq!(secret.as_bytes(), b"whsec_xyz");
}

#[test]
fn secret_debug_is_redacted() {
    let secret = EndpointSecret::from("whsec_super_secret");
    let rendered = format!("{secret:?}");

    assert!(rendered.contains("[REDACTED]"), "got: {rendered}");
    assert!(!rendered.contains("whsec_super_secret"), "got: {rendered}");
}

#[test]
fn secret_serde_is_transparent() {
    let secret = EndpointSecret::new(vec![1, 2, 3]);
    let json = serde_json::to_string(&secret).unwrap();
    assert_eq!(json, "[1,2,3]");

    let back: EndpointSecret = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_bytes(), secret.as_bytes());
}

// ── WebhookEndpoint ──────────────────────────────────────────────────────────

#[test]
fn new_endpoint_is_active() {
    let endpoint = WebhookEndpoint::new(
        "https://example.com/hooks",
        EndpointSecret::from("whsec_abc"),
        [EventName::document_viewed()],
    );

    assert!(endpoint.active);
    assert_eq!(endpoint.url, "https://example.com/hooks");
    assert_eq!(endpoint.events.len(), 1);
}

#[test]
fn new_endpoints_get_distinct_ids() {
    let a = WebhookEndpoint::new("https://a.example", EndpointSecret::from("s"), []);
    let b = WebhookEndpoint::new("https://b.example", EndpointSecret::from("s"), []);

    assert_ne!(a.id, b.id);
}

#[test]
fn subscribes_to_listed_events_only() {
    let endpoint = common::endpoint(&[EventName::document_viewed(), EventName::link_consumed()]);

    assert!(endpoint.subscribes_to(&EventName::document_viewed()));
    assert!(endpoint.subscribes_to(&EventName::link_consumed()));
    assert!(!endpoint.subscribes_to(&EventName::document_downloaded()));
    assert!(!endpoint.subscribes_to(&EventName::from("made.up")));
}

#[test]
fn duplicate_subscriptions_collapse() {
    let endpoint = WebhookEndpoint::new(
        "https://example.com/hooks",
        EndpointSecret::from("s"),
        [
            EventName::document_viewed(),
            EventName::document_viewed(),
            EventName::document_viewed(),
        ],
    );

    assert_eq!(endpoint.events.len(), 1);
}

#[test]
fn https_urls_are_recognized() {
    let endpoint = |url: &str| WebhookEndpoint::new(url, EndpointSecret::from("s"), []);

    assert!(endpoint("https://example.com/hooks").is_https());
    assert!(endpoint("HTTPS://EXAMPLE.COM/HOOKS").is_https());
    assert!(endpoint("HttpS://mixed.example").is_https());
}

#[test]
fn non_https_urls_are_rejected() {
    let endpoint = |url: &str| WebhookEndpoint::new(url, EndpointSecret::from("s"), []);

    assert!(!endpoint("http://example.com/hooks").is_https());
    assert!(!endpoint("ftp://example.com").is_https());
    assert!(!endpoint("example.com/hooks").is_https());
    assert!(!endpoint("").is_https());
    assert!(!endpoint("https:").is_https());
    assert!(!endpoint("https//example.com").is_https());
}

#[test]
fn endpoint_serde_roundtrip() {
    let endpoint = common::endpoint(&[EventName::document_viewed()]);

    let json = serde_json::to_string(&endpoint).unwrap();
    let back: WebhookEndpoint = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, endpoint.id);
    assert_eq!(back.url, endpoint.url);
    assert_eq!(back.secret.as_bytes(), endpoint.secret.as_bytes());
    assert_eq!(back.events, endpoint.events);
    assert_eq!(back.active, endpoint.active);
}
