//! Checkout document serialization.
//!
//! Renders a [`CheckoutRequest`] with `quick-xml`'s serde serializer under a
//! `<checkout>` root. Unset optional fields produce no element at all; required
//! fields are always present, even when empty.

use quick_xml::se::to_string_with_root;

use crate::{
    error::{CheckoutError, Result},
    model::CheckoutRequest,
};

/// Declaration prepended to every outgoing document.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Root element name of request and response documents.
pub const ROOT_ELEMENT: &str = "checkout";

impl CheckoutRequest {
    /// Serializes the request into the checkout document, declaration included.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Serialization`] if the serializer rejects the model.
    pub fn to_xml(&self) -> Result<String> {
        let body = to_string_with_root(ROOT_ELEMENT, self)
            .map_err(|e| CheckoutError::Serialization(e.to_string()))?;
        Ok(format!("{XML_HEADER}{body}"))
    }
}
