//! Newsletter signup handler.
//!
//! Rate limited per anonymous caller; the key is the first `X-Forwarded-For`
//! hop when present (the service runs behind a proxy) and the peer address
//! otherwise.

use crate::{
    api::AppState,
    core::newsletter,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::SocketAddr;

/// Signup payload.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Email address to subscribe
    pub email: String,
}

fn client_key(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// `POST /api/newsletter/subscribe/`
pub async fn subscribe(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let key = client_key(&headers, addr);
    if !state.newsletter_limiter.allow(&key).await {
        return Err(Error::RateLimited);
    }

    let subscriber = newsletter::subscribe(&state.db, &body.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Successfully subscribed to newsletter",
            "email": subscriber.email,
            "redirect_url": format!("/register?email={}", subscriber.email),
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn addr() -> SocketAddr {
        "10.0.0.9:4242".parse().expect("socket addr")
    }

    #[test]
    fn test_client_key_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_key(&headers, addr()), "203.0.113.7");
    }

    #[test]
    fn test_client_key_falls_back_to_peer_ip() {
        assert_eq!(client_key(&HeaderMap::new(), addr()), "10.0.0.9");

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_key(&headers, addr()), "10.0.0.9");
    }
}
