//! Checkout submission.
//!
//! [`CheckoutClient::submit`] serializes a request, posts it to the checkout
//! endpoint with the seller credentials in the query string, buffers the whole
//! answer and decodes it. Nothing is retried.

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::{
    error::{CheckoutError, Result},
    model::CheckoutRequest,
    response::{CheckoutResponse, CheckoutResult, decode_response},
    transport::{TransportConfig, build_http_client},
};

/// Charset announced to the service for the request body.
const REQUEST_CHARSET: &str = "UTF-8";

/// Raw answer of the checkout endpoint.
#[derive(Debug)]
struct RawReply {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

/// Client for the checkout endpoint.
///
/// Cheap to clone; clones share one connection pool. Each submission is
/// independent, so one client may serve concurrent callers as long as each
/// passes its own [`CheckoutRequest`].
///
/// # Examples
///
/// ```rust,no_run
/// use pagseguro_checkout::{CheckoutClient, CheckoutResult, model::CheckoutRequest};
/// use rust_decimal::Decimal;
///
/// # async fn example() -> pagseguro_checkout::Result<()> {
/// let client = CheckoutClient::new()?;
///
/// let mut request = CheckoutRequest::new(
///     "SELLER-TOKEN",
///     "seller@example.com",
///     "ORDER-42",
///     "https://shop.example.com/thanks",
///     "https://shop.example.com/notify",
/// );
/// request.add_item("0001", "Notebook", Decimal::new(249990, 2), 1);
///
/// match client.submit(&request).await {
///     CheckoutResult::Success(response) => {
///         println!("redirect buyer to {}", client.payment_url(&response)?);
///     }
///     CheckoutResult::Rejected(rejection) => {
///         for err in &rejection.errors {
///             eprintln!("{}: {}", err.code, err.message);
///         }
///     }
///     CheckoutResult::Failed(err) => eprintln!("checkout failed: {err}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: Client,
    endpoint: Url,
    config: TransportConfig,
}

impl CheckoutClient {
    /// Creates a client for the production endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self> {
        Self::with_config(&TransportConfig::default())
    }

    /// Creates a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the trust policy cannot
    /// be applied.
    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.checkout_endpoint()?;
        let http = build_http_client(config)?;
        Ok(Self { http, endpoint, config: config.clone() })
    }

    /// Checkout endpoint this client posts to, without credentials.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Payment page URL for an accepted checkout.
    ///
    /// # Errors
    ///
    /// Returns error if the URL cannot be built.
    pub fn payment_url(&self, response: &CheckoutResponse) -> Result<Url> {
        self.config.payment_url(response)
    }

    /// Submits a checkout request.
    ///
    /// Never returns an error: serialization, transport and decode failures
    /// are logged and reported as [`CheckoutResult::Failed`]; errors reported
    /// by the service come back as [`CheckoutResult::Rejected`].
    #[instrument(
        skip(self, request),
        fields(reference = %request.reference, endpoint = %self.endpoint)
    )]
    pub async fn submit(&self, request: &CheckoutRequest) -> CheckoutResult {
        match self.exchange(request).await {
            Ok(reply) => {
                if !reply.status.is_success() {
                    warn!(status = reply.status.as_u16(), "checkout endpoint returned non-success status");
                }
                decode_response(&reply.body, reply.content_type.as_deref())
            }
            Err(err) => {
                error!(error = %err, "checkout submission failed");
                CheckoutResult::Failed(err)
            }
        }
    }

    async fn exchange(&self, request: &CheckoutRequest) -> Result<RawReply> {
        let body = request.to_xml()?;
        let url = checkout_url(&self.endpoint, &request.email, &request.token);

        info!(items = request.items.len(), bytes = body.len(), "submitting checkout");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .await
            .map_err(strip_url)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(strip_url)?.to_vec();

        debug!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            body = %String::from_utf8_lossy(&body),
            "checkout response received"
        );

        Ok(RawReply { status, content_type, body })
    }
}

/// Appends seller credentials and the request charset to the endpoint.
fn checkout_url(endpoint: &Url, email: &str, token: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("email", email)
        .append_pair("token", token)
        .append_pair("charset", REQUEST_CHARSET);
    url
}

/// Drops the request URL from transport errors so the token is never logged.
fn strip_url(err: reqwest::Error) -> CheckoutError {
    CheckoutError::HttpError(err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Environment;

    #[test]
    fn test_create_client() {
        let client = CheckoutClient::new().unwrap();
        assert_eq!(client.endpoint().as_str(), "https://ws.pagseguro.uol.com.br/v2/checkout");
    }

    #[test]
    fn test_create_sandbox_client() {
        let config = TransportConfig { environment: Environment::Sandbox, ..Default::default() };
        let client = CheckoutClient::with_config(&config).unwrap();
        assert_eq!(client.endpoint().host_str(), Some("ws.sandbox.pagseguro.uol.com.br"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TransportConfig { timeout_secs: 0, ..Default::default() };
        assert!(matches!(CheckoutClient::with_config(&config), Err(CheckoutError::ConfigError(_))));
    }

    #[test]
    fn test_checkout_url_query() {
        let endpoint = Url::parse("https://ws.pagseguro.uol.com.br/v2/checkout").unwrap();
        let url = checkout_url(&endpoint, "seller@example.com", "ABC123");
        assert_eq!(
            url.as_str(),
            "https://ws.pagseguro.uol.com.br/v2/checkout?email=seller%40example.com&token=ABC123&charset=UTF-8"
        );
    }

    #[test]
    fn test_checkout_url_encodes_special_chars() {
        let endpoint = Url::parse("https://ws.pagseguro.uol.com.br/v2/checkout").unwrap();
        let url = checkout_url(&endpoint, "a+b@example.com", "to&ken=1");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, [
            ("email".to_owned(), "a+b@example.com".to_owned()),
            ("token".to_owned(), "to&ken=1".to_owned()),
            ("charset".to_owned(), "UTF-8".to_owned()),
        ]);
    }

    #[test]
    fn test_checkout_url_keeps_endpoint_untouched() {
        let endpoint = Url::parse("https://ws.pagseguro.uol.com.br/v2/checkout").unwrap();
        let _ = checkout_url(&endpoint, "seller@example.com", "ABC123");
        assert!(endpoint.query().is_none());
    }

    #[tokio::test]
    async fn test_unresolvable_host_fails() {
        let config = TransportConfig {
            checkout_url: Some("https://checkout.invalid/v2/checkout".to_owned()),
            connect_timeout_secs: 1,
            timeout_secs: 1,
            ..Default::default()
        };
        let client = CheckoutClient::with_config(&config).unwrap();
        let request = CheckoutRequest::new("TOKEN", "seller@example.com", "REF", "", "");

        let result = client.submit(&request).await;
        assert!(matches!(result.failure(), Some(CheckoutError::HttpError(_))));
        assert!(result.errors().is_empty());
        assert!(result.response().is_none());
    }
}
