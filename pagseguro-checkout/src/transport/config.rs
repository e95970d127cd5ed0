//! Transport configuration types.
//!
//! This module defines TOML-deserializable configuration for the checkout
//! endpoint, timeouts and certificate trust.

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{CheckoutError, Result},
    response::CheckoutResponse,
};

/// Production checkout endpoint.
pub const PRODUCTION_CHECKOUT_URL: &str = "https://ws.pagseguro.uol.com.br/v2/checkout";

/// Sandbox checkout endpoint.
pub const SANDBOX_CHECKOUT_URL: &str = "https://ws.sandbox.pagseguro.uol.com.br/v2/checkout";

const PRODUCTION_PAYMENT_URL: &str = "https://pagseguro.uol.com.br/v2/checkout/payment.html";
const SANDBOX_PAYMENT_URL: &str = "https://sandbox.pagseguro.uol.com.br/v2/checkout/payment.html";

/// Target environment of the checkout service.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Live service.
    #[default]
    Production,
    /// Test service; no money moves.
    Sandbox,
}

impl Environment {
    /// Checkout endpoint for this environment.
    #[must_use]
    pub fn checkout_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_CHECKOUT_URL,
            Self::Sandbox => SANDBOX_CHECKOUT_URL,
        }
    }

    /// Buyer-facing payment page for this environment.
    #[must_use]
    pub fn payment_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_PAYMENT_URL,
            Self::Sandbox => SANDBOX_PAYMENT_URL,
        }
    }
}

/// Server certificate trust policy.
///
/// # Examples
///
/// ```toml
/// [tls]
/// mode = "trusted_certificate"
/// pem_path = "/etc/ssl/pagseguro-ca.pem"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TlsPolicy {
    /// Validate against the platform trust store.
    #[default]
    System,
    /// Additionally trust the CA certificate(s) in this PEM file.
    TrustedCertificate {
        /// PEM file holding one or more certificates.
        pem_path: PathBuf,
    },
    /// Skip certificate validation for this client.
    ///
    /// Only the checkout client built from this configuration is affected.
    AcceptInvalidCertificates,
}

/// Checkout transport configuration.
///
/// # Examples
///
/// ```toml
/// environment = "sandbox"
/// connect_timeout_secs = 30
/// timeout_secs = 60
///
/// [tls]
/// mode = "system"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    /// Target environment.
    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment's checkout endpoint.
    #[serde(default)]
    pub checkout_url: Option<String>,

    /// Connection (dial) timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overall request deadline in seconds, body transfer included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Certificate trust policy.
    #[serde(default)]
    pub tls: TlsPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            checkout_url: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            tls: TlsPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::ConfigError`] on malformed TOML or failed validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagseguro_checkout::transport::{Environment, TransportConfig};
    ///
    /// let config = TransportConfig::from_toml("environment = \"sandbox\"")?;
    /// assert_eq!(config.environment, Environment::Sandbox);
    /// assert_eq!(config.connect_timeout_secs, 30);
    /// # Ok::<(), pagseguro_checkout::CheckoutError>(())
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| CheckoutError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `connect_timeout_secs` is outside 1-300 seconds
    /// - `timeout_secs` is outside 1-600 seconds
    /// - the checkout endpoint is not an absolute http(s) URL with a host
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 300 {
            return Err(CheckoutError::ConfigError(
                "connect_timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(CheckoutError::ConfigError(
                "timeout_secs must be between 1 and 600".to_owned(),
            ));
        }
        self.checkout_endpoint()?;
        Ok(())
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns overall timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolves the checkout endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidEndpoint`] if the URL does not parse, is
    /// not http(s), has no host, or already carries a query string.
    pub fn checkout_endpoint(&self) -> Result<Url> {
        let raw = self.checkout_url.as_deref().unwrap_or(self.environment.checkout_url());
        let url = Url::parse(raw).map_err(|e| CheckoutError::InvalidEndpoint(format!("{raw}: {e}")))?;

        if !matches!(url.scheme(), "https" | "http") {
            return Err(CheckoutError::InvalidEndpoint(format!("{raw}: scheme must be https")));
        }
        if url.host_str().is_none() {
            return Err(CheckoutError::InvalidEndpoint(format!("{raw}: missing host")));
        }
        if url.query().is_some() {
            return Err(CheckoutError::InvalidEndpoint(format!("{raw}: query string not allowed")));
        }
        Ok(url)
    }

    /// Builds the payment page URL the buyer is redirected to.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidEndpoint`] if the page URL cannot be built.
    pub fn payment_url(&self, response: &CheckoutResponse) -> Result<Url> {
        Url::parse_with_params(self.environment.payment_url(), &[("code", &response.code)])
            .map_err(|e| CheckoutError::InvalidEndpoint(e.to_string()))
    }
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    60
}
