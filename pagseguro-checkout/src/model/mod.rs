//! Checkout request model.
//!
//! Plain value aggregates built incrementally by the caller. Every mutator
//! returns the object it changed so calls can be chained; singular fields are
//! overwritten on repeated calls rather than duplicated.
//!
//! Numbers are stored as wire text (see [`crate::format`]), so a built request
//! serializes exactly as it reads.

pub mod buyer;
pub mod request;
pub mod shipping;

pub use buyer::{Buyer, Document, DocumentType, Phone};
pub use request::{CheckoutRequest, DEFAULT_CURRENCY, LineItem, Metadata};
pub use shipping::{Address, DEFAULT_COUNTRY, Shipping, ShippingType};
