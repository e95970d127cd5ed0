//! HTTP transport setup.
//!
//! This is the only module that configures sockets and TLS. It turns a
//! [`TransportConfig`] into a [`reqwest::Client`] with a bounded connect
//! timeout, an overall request deadline and an explicit trust policy.
//!
//! # Examples
//!
//! ```
//! use pagseguro_checkout::transport::{TransportConfig, build_http_client};
//!
//! let client = build_http_client(&TransportConfig::default())?;
//! # let _ = client;
//! # Ok::<(), pagseguro_checkout::CheckoutError>(())
//! ```

use std::fs;

use reqwest::{Certificate, Client};
use tracing::warn;

use crate::error::{CheckoutError, Result};

pub mod config;

pub use config::{Environment, TlsPolicy, TransportConfig};

/// Builds the HTTP client used for checkout submissions.
///
/// Configuration:
/// - Connect timeout: `connect_timeout_secs` (default 30 seconds)
/// - Total timeout: `timeout_secs` (default 60 seconds)
/// - Certificate trust: per [`TlsPolicy`]
///
/// # Errors
///
/// Returns [`CheckoutError::TlsError`] if a trusted certificate cannot be read
/// or parsed, or [`CheckoutError::HttpError`] if client construction fails.
pub fn build_http_client(config: &TransportConfig) -> Result<Client> {
    let mut builder =
        Client::builder().connect_timeout(config.connect_timeout()).timeout(config.timeout());

    builder = match &config.tls {
        TlsPolicy::System => builder,
        TlsPolicy::TrustedCertificate { pem_path } => {
            let pem = fs::read(pem_path).map_err(|e| {
                CheckoutError::TlsError(format!("cannot read {}: {e}", pem_path.display()))
            })?;
            let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| {
                CheckoutError::TlsError(format!("invalid PEM in {}: {e}", pem_path.display()))
            })?;
            if certificates.is_empty() {
                return Err(CheckoutError::TlsError(format!(
                    "no certificate found in {}",
                    pem_path.display()
                )));
            }
            certificates.into_iter().fold(builder, reqwest::ClientBuilder::add_root_certificate)
        }
        TlsPolicy::AcceptInvalidCertificates => {
            warn!("certificate validation disabled for checkout client");
            builder.danger_accept_invalid_certs(true)
        }
    };

    builder.build().map_err(CheckoutError::HttpError)
}
