use shared::protocol::VALUES_PATH;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const API_BASE_URL_ENV: &str = "VALUES_API_BASE_URL";

/// Where the values API lives. Injected into [`crate::ValuesClient`] rather
/// than baked into the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    /// Default config, with the base url taken from `VALUES_API_BASE_URL` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Self {
        match env(API_BASE_URL_ENV) {
            Some(v) if !v.trim().is_empty() => Self::new(v.trim()),
            _ => Self::default(),
        }
    }

    /// Full url of the values collection endpoint.
    pub fn values_url(&self) -> Result<Url, url::ParseError> {
        let base = self.api_base_url.trim().trim_end_matches('/');
        Url::parse(&format!("{base}{VALUES_PATH}"))
    }
}
