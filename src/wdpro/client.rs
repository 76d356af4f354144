//! Disney client
//!
//! Main client for the facility service, combining the token cache with the
//! HTTP wrapper and building resource URLs.

use super::auth::Credentials;
use super::clock::{Clock, SystemClock};
use super::error::{Error, Result};
use super::http::{ApiResponse, WdproHttpClient};
use crate::config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Main facility-service client.
///
/// Each client owns its own token cache; clones share it.
#[derive(Clone)]
pub struct DisneyClient {
    pub credentials: Credentials,
    pub http: WdproHttpClient,
    api_base_url: String,
}

impl DisneyClient {
    /// Create a client with the default endpoints and user agent
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a client from explicit configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a client whose token expiry follows `clock`
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(config.cookie_store);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(Error::Client)?;

        Ok(Self {
            credentials: Credentials::new(client.clone(), config.auth_url, clock),
            http: WdproHttpClient::new(client),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get a currently valid access token
    pub async fn get_token(&self) -> Result<String> {
        self.credentials.get_token().await
    }

    /// GET a full URL with query parameters
    pub async fn get_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let token = self.get_token().await?;
        self.http.get(url, query, &token).await
    }

    /// GET a full URL, e.g. a link taken from an earlier response
    pub async fn get_by_url(&self, url: &str) -> Result<ApiResponse> {
        self.get_with_query(url, &[]).await
    }

    /// GET a resource by numeric id and type name, optionally a sub-page of it
    pub async fn get_by_id(&self, id: u64, kind: &str, subpage: Option<&str>) -> Result<ApiResponse> {
        let url = self.resource_url(id, kind, subpage);
        self.get_by_url(&url).await
    }

    /// Wait times for the resource with this id and type
    pub async fn get_wait_times(&self, id: u64, kind: &str) -> Result<ApiResponse> {
        self.get_by_id(id, kind, Some("wait-times")).await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build `<base>/<plural type>/<id>[/<subpage>]`
    pub fn resource_url(&self, id: u64, kind: &str, subpage: Option<&str>) -> String {
        format!(
            "{}/{}/{}{}",
            self.api_base_url,
            collection_name(kind),
            id,
            subpage_suffix(subpage)
        )
    }
}

/// Lowercase, drop anything outside `[a-z0-9-]`, pluralize.
pub fn collection_name(kind: &str) -> String {
    let cleaned: String = kind
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return cleaned;
    }
    pluralizer::pluralize(&cleaned, 2, false)
}

fn subpage_suffix(subpage: Option<&str>) -> String {
    match subpage {
        None | Some("") => String::new(),
        Some(page) if page.starts_with('/') => page.to_string(),
        Some(page) => format!("/{page}"),
    }
}
