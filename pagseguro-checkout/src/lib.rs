//! PagSeguro Checkout: payment requests over the v2 checkout API
//!
//! A Rust client that builds a checkout request, renders it as the service's
//! XML dialect, posts it over HTTPS and turns the answer into either a checkout
//! code or the list of errors the service reported.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  CheckoutRequest │  built by the caller (model)
//! └────────┬─────────┘
//!          │ to_xml (xml)
//! ┌────────▼─────────┐      ┌─────────────────────┐
//! │  CheckoutClient  │──────│  reqwest::Client    │  connect timeout,
//! │  (submit)        │      │  (transport)        │  trust policy
//! └────────┬─────────┘      └─────────────────────┘
//!          │ raw body + Content-Type
//! ┌────────▼─────────┐
//! │  decode_response │  charset → superset decode → errors win
//! └────────┬─────────┘
//!          │
//!   CheckoutResult::{Success, Rejected, Failed}
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pagseguro_checkout::{
//!     CheckoutClient, CheckoutResult,
//!     model::{CheckoutRequest, ShippingType},
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> pagseguro_checkout::Result<()> {
//! let mut request = CheckoutRequest::new(
//!     "SELLER-TOKEN",
//!     "seller@example.com",
//!     "ORDER-42",
//!     "https://shop.example.com/thanks",
//!     "https://shop.example.com/notify",
//! );
//! request.add_item("0001", "Notebook", Decimal::new(249990, 2), 1).set_weight(1500);
//! request
//!     .set_buyer("Maria Silva", "maria@example.com")
//!     .set_phone("11", "55551234")
//!     .set_cpf("12345678909");
//! request
//!     .set_shipping(ShippingType::Sedex, Decimal::new(2500, 2))
//!     .set_address("SP", "Sao Paulo", "01452002", "Jardim Paulistano", "Av. Faria Lima", "1384", "");
//!
//! let client = CheckoutClient::new()?;
//! if let CheckoutResult::Success(response) = client.submit(&request).await {
//!     println!("pay at {}", client.payment_url(&response)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`model`]: request aggregate, items, buyer, shipping, metadata
//! - [`format`]: amount and count wire formatting
//! - [`xml`]: checkout document serialization
//! - [`transport`]: endpoint, timeouts and certificate trust
//! - [`response`]: response decoding and [`CheckoutResult`]
//! - [`client`]: [`CheckoutClient::submit`]
//! - [`error`]: error types
//!
//! # Security Considerations
//!
//! - Seller email and token travel in the query string, as the service
//!   requires. They are stripped from logged transport errors and never
//!   written to logs.
//! - Certificate validation follows the platform trust store unless the
//!   [`transport::TlsPolicy`] says otherwise. Prefer
//!   `TrustedCertificate` over `AcceptInvalidCertificates`.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod error;
pub mod format;
pub mod model;
pub mod response;
pub mod transport;
pub mod xml;

pub use client::CheckoutClient;
pub use error::{CheckoutError, Result};
pub use response::{CheckoutResponse, CheckoutResult, ErrorResponse, RemoteError, decode_response};
