//! Webhook signature verification and event parsing.
//!
//! The gateway signs each delivery with a shared secret: the
//! `Stripe-Signature` header carries `t=<unix>,v1=<hex hmac>` pairs, and the
//! signature is HMAC-SHA256 over `"{t}.{raw body}"`. Verification accepts any
//! matching `v1` candidate (the gateway sends several during secret
//! rotation), compares in constant time, and rejects timestamps outside the
//! allowed skew.

use crate::errors::{Error, Result};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header the gateway puts its signature in.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Maximum accepted age (and future skew) of a signed timestamp, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Event type sent when a charge goes through.
pub const EVENT_PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";
/// Event type sent when a charge is declined.
pub const EVENT_PAYMENT_FAILED: &str = "payment_intent.payment_failed";

/// A verified, parsed gateway notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEvent {
    /// The gateway's event type string (e.g., "payment_intent.succeeded")
    pub event_type: String,
    /// The payment-intent id the event refers to, when the payload carries one
    pub payment_intent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Option<EventData>,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: EventObject,
}

#[derive(Debug, Deserialize)]
struct EventObject {
    id: String,
}

/// Verifies the signature header against the raw payload.
///
/// `now_unix` is injected rather than read from the clock so callers (and
/// tests) control the reference time for the skew check.
///
/// # Errors
/// Returns [`Error::WebhookSignature`] if the header is malformed, the
/// timestamp is outside `tolerance_secs`, or no `v1` candidate matches.
pub fn verify_signature(
    secret: &[u8],
    payload: &[u8],
    signature_header: &str,
    now_unix: i64,
    tolerance_secs: i64,
) -> Result<()> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for part in signature_header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => candidates.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| Error::WebhookSignature {
        message: "missing or unparseable timestamp".to_string(),
    })?;
    if candidates.is_empty() {
        return Err(Error::WebhookSignature {
            message: "no v1 signature present".to_string(),
        });
    }
    if (now_unix - timestamp).abs() > tolerance_secs {
        return Err(Error::WebhookSignature {
            message: "timestamp outside tolerance".to_string(),
        });
    }

    let timestamp_part = timestamp.to_string();
    for candidate in candidates {
        let Ok(expected) = hex::decode(candidate) else {
            continue;
        };
        let mut mac =
            HmacSha256::new_from_slice(secret).map_err(|e| Error::WebhookSignature {
                message: e.to_string(),
            })?;
        mac.update(timestamp_part.as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(&expected).is_ok() {
            return Ok(());
        }
    }

    Err(Error::WebhookSignature {
        message: "signature mismatch".to_string(),
    })
}

/// Parses a verified payload into a [`GatewayEvent`].
///
/// # Errors
/// Returns [`Error::WebhookPayload`] if the body is not the expected event
/// envelope.
pub fn parse_event(payload: &[u8]) -> Result<GatewayEvent> {
    let envelope: EventEnvelope =
        serde_json::from_slice(payload).map_err(|e| Error::WebhookPayload {
            message: e.to_string(),
        })?;
    Ok(GatewayEvent {
        event_type: envelope.event_type,
        payment_intent_id: envelope.data.map(|d| d.object.id),
    })
}

/// Verifies the signature and parses the payload in one step.
///
/// # Errors
/// Propagates the signature or payload error of the failing stage.
pub fn verify_and_parse(
    secret: &[u8],
    payload: &[u8],
    signature_header: &str,
    now_unix: i64,
    tolerance_secs: i64,
) -> Result<GatewayEvent> {
    verify_signature(secret, payload, signature_header, now_unix, tolerance_secs)?;
    parse_event(payload)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const SECRET: &[u8] = b"whsec_test_secret";

    /// Builds a valid signature header the way the gateway would.
    fn sign(payload: &[u8], timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET).unwrap();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let digest = mac.finalize().into_bytes();
        format!("t={timestamp},v1={}", hex::encode(digest))
    }

    fn succeeded_payload() -> Vec<u8> {
        br#"{"type": "payment_intent.succeeded", "data": {"object": {"id": "pi_123"}}}"#.to_vec()
    }

    #[test]
    fn test_valid_signature_verifies() {
        let payload = succeeded_payload();
        let header = sign(&payload, 1_700_000_000);
        verify_signature(SECRET, &payload, &header, 1_700_000_010, DEFAULT_TOLERANCE_SECS)
            .unwrap();
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let payload = succeeded_payload();
        let header = sign(&payload, 1_700_000_000);
        let tampered = br#"{"type": "payment_intent.succeeded", "data": {"object": {"id": "pi_999"}}}"#;
        let result = verify_signature(
            SECRET,
            tampered,
            &header,
            1_700_000_010,
            DEFAULT_TOLERANCE_SECS,
        );
        assert!(matches!(
            result.unwrap_err(),
            Error::WebhookSignature { message: _ }
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = succeeded_payload();
        let mut mac = HmacSha256::new_from_slice(b"some_other_secret").unwrap();
        mac.update(b"1700000000");
        mac.update(b".");
        mac.update(&payload);
        let header = format!("t=1700000000,v1={}", hex::encode(mac.finalize().into_bytes()));
        assert!(
            verify_signature(SECRET, &payload, &header, 1_700_000_010, DEFAULT_TOLERANCE_SECS)
                .is_err()
        );
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let payload = succeeded_payload();
        let header = sign(&payload, 1_700_000_000);
        let result = verify_signature(
            SECRET,
            &payload,
            &header,
            1_700_000_000 + DEFAULT_TOLERANCE_SECS + 1,
            DEFAULT_TOLERANCE_SECS,
        );
        assert!(matches!(
            result.unwrap_err(),
            Error::WebhookSignature { message: _ }
        ));
    }

    #[test]
    fn test_second_v1_candidate_accepted() {
        // During secret rotation the gateway sends one v1 per active secret.
        let payload = succeeded_payload();
        let good = sign(&payload, 1_700_000_000);
        let good_sig = good.split_once("v1=").unwrap().1.to_string();
        let header = format!("t=1700000000,v1={},v1={good_sig}", "00".repeat(32));
        verify_signature(SECRET, &payload, &header, 1_700_000_000, DEFAULT_TOLERANCE_SECS)
            .unwrap();
    }

    #[test]
    fn test_malformed_header_rejected() {
        let payload = succeeded_payload();
        for header in ["", "v1=abcd", "t=notanumber,v1=abcd", "t=1700000000"] {
            let result =
                verify_signature(SECRET, &payload, header, 1_700_000_000, DEFAULT_TOLERANCE_SECS);
            assert!(result.is_err(), "header {header:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_event_extracts_intent_id() {
        let event = parse_event(&succeeded_payload()).unwrap();
        assert_eq!(event.event_type, EVENT_PAYMENT_SUCCEEDED);
        assert_eq!(event.payment_intent_id.as_deref(), Some("pi_123"));
    }

    #[test]
    fn test_parse_event_without_data_section() {
        let event = parse_event(br#"{"type": "charge.dispute.created"}"#).unwrap();
        assert_eq!(event.event_type, "charge.dispute.created");
        assert!(event.payment_intent_id.is_none());
    }

    #[test]
    fn test_parse_event_rejects_garbage() {
        let result = parse_event(b"not json at all");
        assert!(matches!(
            result.unwrap_err(),
            Error::WebhookPayload { message: _ }
        ));
    }
}
