//! API endpoint configuration.
//!
//! The client talks to a single REST base URL fixed at startup, plus a
//! separate base URL from which student and teacher photos are served.

use std::env;

use url::Url;

use crate::first_var;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://ahuiho.okulpanel.com/api";

/// Default base URL for uploaded photos.
pub const DEFAULT_UPLOAD_URL: &str = "https://ahuiho.okulpanel.com/uploads";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name} URL '{value}': {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// API configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `OKULPANEL_API_URL` (or `EXPO_PUBLIC_API`): REST base URL
/// - `OKULPANEL_UPLOAD_URL` (or `EXPO_PUBLIC_FOTO_API`): photo base URL
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,

    /// Base URL for photo retrieval. Always ends with a slash.
    pub upload_base_url: Url,
}

impl ApiConfig {
    /// Builds a configuration from explicit URLs.
    pub fn new(api_url: &str, upload_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("API", api_url)?,
            upload_base_url: parse_url("upload", &with_trailing_slash(upload_url))?,
        })
    }

    /// Load configuration from environment variables, falling back to the
    /// hosted defaults when a variable is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = first_var(&lookup, &["OKULPANEL_API_URL", "EXPO_PUBLIC_API"])
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let upload_url = first_var(&lookup, &["OKULPANEL_UPLOAD_URL", "EXPO_PUBLIC_FOTO_API"])
            .unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string());

        Self::new(&api_url, &upload_url)
    }

    /// Full URL for an endpoint path such as `/user/login`.
    ///
    /// The path is appended to the base URL verbatim, so a base of
    /// `https://host/api` and a path of `/user/info` give
    /// `https://host/api/user/info`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "https://ahuiho.okulpanel.com/api");
        assert_eq!(
            config.upload_base_url.as_str(),
            "https://ahuiho.okulpanel.com/uploads/"
        );
    }

    #[test]
    fn test_legacy_variable_names() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("EXPO_PUBLIC_API", "http://localhost:8080/api"),
            ("EXPO_PUBLIC_FOTO_API", "http://localhost:8080/files"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint("/user/info"), "http://localhost:8080/api/user/info");
        assert_eq!(config.upload_base_url.as_str(), "http://localhost:8080/files/");
    }

    #[test]
    fn test_primary_variable_wins() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("OKULPANEL_API_URL", "http://primary/api"),
            ("EXPO_PUBLIC_API", "http://legacy/api"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("primary"));
    }

    #[test]
    fn test_blank_variable_falls_back() {
        let config = ApiConfig::from_lookup(lookup(&[("OKULPANEL_API_URL", "   ")])).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = ApiConfig::new("not a url", DEFAULT_UPLOAD_URL);
        assert!(matches!(result, Err(ConfigError::InvalidUrl { name: "API", .. })));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = ApiConfig::new("http://host/api/", "http://host/up").unwrap();
        assert_eq!(config.endpoint("student/all"), "http://host/api/student/all");
        assert_eq!(config.endpoint("/student/all"), "http://host/api/student/all");
    }
}
