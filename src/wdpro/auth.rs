//! Session token handling
//!
//! Fetches the public bearer token from the authorization endpoint and keeps
//! it until shortly before it expires.

use super::clock::Clock;
use super::error::{Error, Result};
use super::http::bearer_header;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Form body sent to the token endpoint.
const TOKEN_REQUEST_FORM: &[(&str, &str)] = &[
    ("assertion_type", "public"),
    ("client_id", "WDPRO-MOBILE.CLIENT-PROD"),
    ("grant_type", "assertion"),
];

/// Token expiry buffer - a token is dropped this long before the server
/// says it expires, so it is never presented mid-expiry.
const TOKEN_EXPIRY_BUFFER_SECS: i64 = 30;

/// Bearer credential holder with expiry-aware caching.
///
/// Clones share one cache. Concurrent callers that all see an empty or
/// expired cache each fetch a token; whichever response lands last is kept.
#[derive(Clone)]
pub struct Credentials {
    http: Client,
    token_url: String,
    clock: Arc<dyn Clock>,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token stops being used (buffer already applied)
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl Credentials {
    pub fn new(http: Client, token_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            clock,
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Return a currently valid token, fetching one if the cache is empty
    /// or expired.
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid(self.clock.now()) {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        // The lock is not held across the fetch: overlapping refreshes are allowed.
        let fetched = self.fetch_token().await?;
        let token = fetched.token.clone();

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(fetched);
        }

        Ok(token)
    }

    /// Drop the cached token and fetch a fresh one
    pub async fn refresh_token(&self) -> Result<String> {
        self.invalidate().await;
        self.get_token().await
    }

    /// Drop the cached token; the next request fetches a new one
    pub async fn invalidate(&self) {
        let mut cache = self.token_cache.write().await;
        *cache = None;
    }

    /// Expiry instant of the cached token, if there is one
    pub async fn cached_expiry(&self) -> Option<DateTime<Utc>> {
        self.token_cache.read().await.as_ref().map(|c| c.expires_at)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        tracing::debug!("POST {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .form(TOKEN_REQUEST_FORM)
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("Token endpoint returned {}", status);
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(Error::Network)?;
        let (token, expires_in) = parse_token_body(&body)?;

        let lifetime = Duration::try_seconds(expires_in.saturating_sub(TOKEN_EXPIRY_BUFFER_SECS))
            .ok_or_else(|| Error::InvalidTokenResponse(format!("expires_in out of range: {expires_in}")))?;
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| Error::InvalidTokenResponse(format!("expires_in out of range: {expires_in}")))?;

        tracing::info!("New token cached, expires in ~{}s", lifetime.num_seconds());

        Ok(CachedToken { token, expires_at })
    }
}

/// Pull `access_token` and `expires_in` out of a token response body.
///
/// Both must be present and non-empty, and the token must be usable as a
/// header value; `expires_in` may be a number or a numeric string.
fn parse_token_body(body: &str) -> Result<(String, i64)> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| Error::InvalidTokenResponse(format!("body is not JSON: {e}")))?;

    let token = data
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::InvalidTokenResponse("missing access_token".into()))?;
    bearer_header(token)?;

    let expires_in = match data.get("expires_in") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .filter(|secs| *secs != 0)
    .ok_or_else(|| Error::InvalidTokenResponse("missing expires_in".into()))?;

    Ok((token.to_string(), expires_in))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_body() {
        let (token, expires_in) =
            parse_token_body(r#"{"access_token":"abc","expires_in":1800}"#).unwrap();
        assert_eq!(token, "abc");
        assert_eq!(expires_in, 1800);

        let (_, expires_in) =
            parse_token_body(r#"{"access_token":"abc","expires_in":"600"}"#).unwrap();
        assert_eq!(expires_in, 600);
    }

    #[test]
    fn test_parse_token_body_rejects_incomplete() {
        for body in [
            r#"{"expires_in":1800}"#,
            r#"{"access_token":"","expires_in":1800}"#,
            r#"{"access_token":"abc"}"#,
            r#"{"access_token":"abc","expires_in":0}"#,
            r#"{"access_token":"abc","expires_in":"soon"}"#,
            r#"{"access_token":"abc\ndef","expires_in":1800}"#,
            r#"{"access_token":"abc\u0000","expires_in":1800}"#,
            "<html>maintenance</html>",
            "",
        ] {
            assert!(
                matches!(parse_token_body(body), Err(Error::InvalidTokenResponse(_))),
                "accepted {body:?}"
            );
        }
    }

    #[test]
    fn test_cached_token_validity_boundary() {
        let now = Utc::now();
        let cached = CachedToken {
            token: "t".into(),
            expires_at: now + Duration::seconds(70),
        };
        assert!(cached.is_valid(now));
        assert!(cached.is_valid(now + Duration::milliseconds(69_999)));
        assert!(!cached.is_valid(now + Duration::seconds(70)));
    }
}
