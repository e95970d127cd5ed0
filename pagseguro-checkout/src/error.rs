//! Error types for the checkout client.
//!
//! Every fallible step inside the client returns [`Result`], and
//! [`CheckoutClient::submit`](crate::CheckoutClient::submit) folds any
//! [`CheckoutError`] into [`CheckoutResult::Failed`](crate::CheckoutResult::Failed),
//! so a submission never surfaces an `Err` to the caller.
//!
//! # Error Categories
//!
//! - **Local** ([`CheckoutError::Serialization`], [`CheckoutError::InvalidAmount`]):
//!   the request could not be rendered; nothing was sent
//! - **Network** ([`CheckoutError::HttpError`]): DNS, connect, TLS, timeout or write failures
//! - **Response** ([`CheckoutError::Decode`]): the body matched neither response shape
//! - **Setup** ([`CheckoutError::ConfigError`], [`CheckoutError::InvalidEndpoint`],
//!   [`CheckoutError::TlsError`]): the client could not be constructed
//!
//! Business-level rejections (bad credentials, invalid fields) are not errors
//! here: they arrive as [`CheckoutResult::Rejected`](crate::CheckoutResult::Rejected).
//!
//! # Examples
//!
//! ```
//! use pagseguro_checkout::error::{CheckoutError, Result};
//!
//! fn require_reference(reference: &str) -> Result<&str> {
//!     if reference.is_empty() {
//!         return Err(CheckoutError::Serialization("reference must not be empty".to_owned()));
//!     }
//!     Ok(reference)
//! }
//!
//! assert!(require_reference("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Errors that can occur while building, sending or decoding a checkout.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request model could not be rendered as a checkout document.
    ///
    /// No network attempt is made when this happens.
    #[error("checkout serialization failed: {0}")]
    Serialization(String),

    /// HTTP exchange with the checkout endpoint failed.
    ///
    /// Wraps [`reqwest::Error`]. Common causes include:
    /// - Connect timeout (default: 30 seconds)
    /// - Connection refused or DNS resolution failure
    /// - TLS handshake rejected by the configured [`TlsPolicy`](crate::transport::TlsPolicy)
    /// - Overall request deadline exceeded while reading the body
    ///
    /// # Recovery
    ///
    /// The client never retries. A caller that retries should reuse the same
    /// reference id so notifications can still be correlated.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body matched neither the error list nor the success shape.
    ///
    /// Also raised when the declared charset is unknown.
    #[error("checkout response could not be decoded: {0}")]
    Decode(String),

    /// The configured checkout endpoint is not a usable URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagseguro_checkout::error::CheckoutError;
    ///
    /// let err = CheckoutError::InvalidEndpoint("ftp://ws.example.com".to_owned());
    /// assert!(err.to_string().contains("Invalid checkout endpoint"));
    /// ```
    #[error("Invalid checkout endpoint: {0}")]
    InvalidEndpoint(String),

    /// A floating-point amount was NaN or infinite.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Configuration could not be parsed or is out of bounds.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The trust policy could not be applied (unreadable or malformed certificate).
    #[error("TLS setup failed: {0}")]
    TlsError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CheckoutError::Serialization("unsupported value".into());
        assert_eq!(error.to_string(), "checkout serialization failed: unsupported value");
    }

    #[test]
    fn test_decode_error() {
        let error = CheckoutError::Decode("unexpected end of input".into());
        assert!(error.to_string().contains("could not be decoded"));
    }

    #[test]
    fn test_invalid_amount_error() {
        let error = CheckoutError::InvalidAmount("NaN".to_owned());
        assert_eq!(error.to_string(), "Invalid amount: NaN");
    }

    #[test]
    fn test_config_error() {
        let error = CheckoutError::ConfigError("timeout_secs must be between 1 and 600".to_owned());
        assert_eq!(error.to_string(), "Invalid configuration: timeout_secs must be between 1 and 600");
    }
}
