//! HTTP utilities for facility-service calls

use super::error::{Error, Result};
use super::normalize::normalize_response;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;

/// Accept header the facility service expects
const ACCEPT_API_V1: &str = "application/json;apiversion=1";

const CONVERSATION_ID_HEADER: &str = "X-Conversation-Id";
const CONVERSATION_ID: &str = "~WDPRO-MOBILE.CLIENT-PROD";

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a body for logging and strip anything unprintable
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Body of a resource response.
///
/// Bodies that decode as JSON come back normalized; anything else is handed
/// over verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Raw(String),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ApiResponse::Raw(_))
    }
}

/// HTTP wrapper for authenticated facility-service GETs
#[derive(Clone)]
pub struct WdproHttpClient {
    client: Client,
}

/// `Authorization` value for `token`; fails if the token holds bytes a
/// header cannot carry.
pub(crate) fn bearer_header(token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("BEARER {token}"))
        .map_err(|_| Error::InvalidTokenResponse("access_token is not a valid header value".into()))
}

impl WdproHttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn headers(token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer_header(token)?);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_API_V1));
        headers.insert(
            CONVERSATION_ID_HEADER,
            HeaderValue::from_static(CONVERSATION_ID),
        );
        Ok(headers)
    }

    /// GET `url` with `query` appended, presenting `token`.
    ///
    /// Only a failure to reach the server is an error. The status code is not
    /// consulted: whatever body comes back is decoded (and normalized) or
    /// returned raw.
    pub async fn get(&self, url: &str, query: &[(&str, &str)], token: &str) -> Result<ApiResponse> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).headers(Self::headers(token)?);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(Error::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            tracing::warn!("API returned {} - {}", status, sanitize_for_log(&body));
        }

        Ok(decode_body(body))
    }
}

/// Decode and normalize a body, falling back to the raw text.
pub(crate) fn decode_body(body: String) -> ApiResponse {
    match serde_json::from_str::<Value>(&body) {
        Ok(mut value) => {
            normalize_response(&mut value);
            ApiResponse::Json(value)
        }
        Err(e) => {
            tracing::warn!(
                "Response is not JSON ({}), returning raw body: {}",
                e,
                sanitize_for_log(&body)
            );
            ApiResponse::Raw(body)
        }
    }
}
