//! Merchant session context.

use std::fmt;
use std::sync::Arc;

use crate::client::Client;
use crate::config::{ClientOptions, MerchantConfig};
use crate::error::ClientError;

/// An authenticated Openpay merchant.
///
/// Cloning is cheap and every clone refers to the same session; two
/// `Merchant`s compare equal only when they share it. Customer operations are
/// defined on this type (see [`Merchant::add_customer`] and friends).
#[derive(Clone)]
pub struct Merchant {
    client: Arc<Client>,
}

impl Merchant {
    /// Create a merchant against the sandbox environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are empty or the HTTP client cannot
    /// be built.
    pub fn new(
        merchant_id: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(merchant_id, private_key, ClientOptions::default())
    }

    /// Create a merchant with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are empty or the HTTP client cannot
    /// be built.
    pub fn with_options(
        merchant_id: impl Into<String>,
        private_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        Self::from_config(MerchantConfig {
            merchant_id: merchant_id.into(),
            private_key: private_key.into(),
            options,
        })
    }

    /// Create a merchant from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are empty or the HTTP client cannot
    /// be built.
    pub fn from_config(config: MerchantConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: Arc::new(Client::new(config)?),
        })
    }

    /// Create a merchant from `OPENPAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`MerchantConfig::from_env`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_config(MerchantConfig::from_env()?)
    }

    /// The Openpay merchant identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.client.merchant_id()
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

impl PartialEq for Merchant {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.client, &other.client)
    }
}

impl Eq for Merchant {}

impl fmt::Debug for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merchant").field("id", &self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_session() {
        let merchant = Merchant::new("m123", "sk_test").unwrap();
        let clone = merchant.clone();
        assert_eq!(merchant, clone);
        assert_eq!(clone.id(), "m123");
    }

    #[test]
    fn separate_sessions_are_not_equal() {
        let a = Merchant::new("m123", "sk_test").unwrap();
        let b = Merchant::new("m123", "sk_test").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_private_key_is_rejected() {
        assert!(matches!(
            Merchant::new("m123", ""),
            Err(ClientError::Configuration(_))
        ));
    }
}
