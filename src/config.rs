//! Client configuration
//!
//! Endpoints and HTTP settings used when constructing a client.

pub const DEFAULT_AUTH_URL: &str = "https://authorization.go.com/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.wdpro.disney.go.com/facility-service";

/// User agent the mobile app's web view presents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; U; Android 4.3; en-GB; C6502 Build/10.4.1.B.0.101) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Token endpoint
    pub auth_url: String,
    /// Facility-service root, without trailing slash
    pub api_base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Whole-request timeout; none by default
    pub timeout_secs: Option<u64>,
    /// Keep cookies between requests
    pub cookie_store: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            cookie_store: true,
        }
    }
}

impl Config {
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.user_agent.contains("Android"));
        assert_eq!(config.timeout_secs, None);
        assert!(config.cookie_store);
    }

    #[test]
    fn config_builder() {
        let config = Config::default()
            .with_auth_url("http://localhost:8080/token")
            .with_api_base_url("http://localhost:8080/facility-service")
            .with_user_agent("wdpro-test")
            .with_timeout(5)
            .with_cookie_store(false);

        assert_eq!(config.auth_url, "http://localhost:8080/token");
        assert_eq!(config.api_base_url, "http://localhost:8080/facility-service");
        assert_eq!(config.user_agent, "wdpro-test");
        assert_eq!(config.timeout_secs, Some(5));
        assert!(!config.cookie_store);
    }
}
