//! Client configuration.

use crate::error::ClientError;

/// Openpay sandbox API base URL.
pub const SANDBOX_URL: &str = "https://sandbox-api.openpay.mx/v1";

/// Openpay production API base URL.
pub const PRODUCTION_URL: &str = "https://api.openpay.mx/v1";

/// Which Openpay environment requests are sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Test environment, no real money moves.
    #[default]
    Sandbox,
    /// Live environment.
    Production,
}

impl Environment {
    /// Base URL of the environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_URL,
            Self::Production => PRODUCTION_URL,
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Target environment (default: sandbox).
    pub environment: Environment,
    /// Overrides the environment's base URL when set.
    pub base_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            environment: Environment::Sandbox,
            base_url: None,
        }
    }
}

impl ClientOptions {
    /// Options targeting the production environment.
    #[must_use]
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Send requests to `url` instead of the environment's base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// The base URL requests are resolved against, without a trailing slash.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(self.environment.base_url())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Credentials and options for a merchant, usually loaded from the environment.
#[derive(Clone)]
pub struct MerchantConfig {
    /// Openpay merchant identifier.
    pub merchant_id: String,
    /// Private API key (`sk_...`).
    pub private_key: String,
    /// Transport options.
    pub options: ClientOptions,
}

impl std::fmt::Debug for MerchantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantConfig")
            .field("merchant_id", &self.merchant_id)
            .field("private_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl MerchantConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `OPENPAY_MERCHANT_ID` and `OPENPAY_PRIVATE_KEY` (required), plus
    /// `OPENPAY_PRODUCTION`, `OPENPAY_API_URL` and `OPENPAY_TIMEOUT_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if a required variable is missing
    /// or a value cannot be parsed.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ClientError::Configuration(format!("{key} is not set")))
        };

        let merchant_id = required("OPENPAY_MERCHANT_ID")?;
        let private_key = required("OPENPAY_PRIVATE_KEY")?;

        let mut options = ClientOptions::default();

        if let Some(flag) = var("OPENPAY_PRODUCTION") {
            if parse_flag(&flag)? {
                options.environment = Environment::Production;
            }
        }
        if let Some(url) = var("OPENPAY_API_URL").filter(|v| !v.is_empty()) {
            options.base_url = Some(url);
        }
        if let Some(timeout) = var("OPENPAY_TIMEOUT_SECONDS") {
            options.timeout_seconds = timeout.parse().map_err(|_| {
                ClientError::Configuration(format!(
                    "OPENPAY_TIMEOUT_SECONDS must be an integer, got {timeout:?}"
                ))
            })?;
        }

        Ok(Self {
            merchant_id,
            private_key,
            options,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, ClientError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "" | "0" | "false" | "no" => Ok(false),
        other => Err(ClientError::Configuration(format!(
            "OPENPAY_PRODUCTION must be a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_options_target_sandbox() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout_seconds, 30);
        assert_eq!(options.resolved_base_url(), SANDBOX_URL);
    }

    #[test]
    fn base_url_override_is_trimmed() {
        let options = ClientOptions::production().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(options.resolved_base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn from_vars_reads_required_and_optional() {
        let config = MerchantConfig::from_vars(vars(&[
            ("OPENPAY_MERCHANT_ID", "m123"),
            ("OPENPAY_PRIVATE_KEY", "sk_abc"),
            ("OPENPAY_PRODUCTION", "true"),
            ("OPENPAY_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.merchant_id, "m123");
        assert_eq!(config.private_key, "sk_abc");
        assert_eq!(config.options.environment, Environment::Production);
        assert_eq!(config.options.timeout_seconds, 5);
        assert_eq!(config.options.resolved_base_url(), PRODUCTION_URL);
    }

    #[test]
    fn from_vars_requires_credentials() {
        let err = MerchantConfig::from_vars(vars(&[("OPENPAY_MERCHANT_ID", "m123")])).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(msg) if msg.contains("OPENPAY_PRIVATE_KEY")));
    }

    #[test]
    fn from_vars_rejects_bad_flag() {
        let err = MerchantConfig::from_vars(vars(&[
            ("OPENPAY_MERCHANT_ID", "m123"),
            ("OPENPAY_PRIVATE_KEY", "sk_abc"),
            ("OPENPAY_PRODUCTION", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn debug_redacts_private_key() {
        let config = MerchantConfig {
            merchant_id: "m123".into(),
            private_key: "sk_secret".into(),
            options: ClientOptions::default(),
        };
        assert!(!format!("{config:?}").contains("sk_secret"));
    }
}
