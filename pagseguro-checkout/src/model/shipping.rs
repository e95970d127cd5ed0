//! Shipping section of the checkout document.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::format::format_amount;

/// Country code the checkout API expects in every address.
pub const DEFAULT_COUNTRY: &str = "BRA";

/// Shipping method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingType {
    /// Regular postal service (PAC).
    Pac,
    /// Express postal service (SEDEX).
    Sedex,
    /// Any other carrier, or shipping not calculated by the service.
    Other,
}

impl ShippingType {
    /// Numeric wire code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Pac => 1,
            Self::Sedex => 2,
            Self::Other => 3,
        }
    }
}

impl Serialize for ShippingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code().to_string())
    }
}

/// Delivery address.
///
/// Length limits documented by the service (city 2–60, district 60, street 80,
/// number 20, complement 40) are left for the service to enforce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// ISO 3166-1 alpha-3 country code, always emitted.
    pub country: String,
    /// State abbreviation, e.g. `SP`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    /// City name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    /// Eight-digit CEP.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    /// District (bairro).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub district: String,
    /// Street name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub street: String,
    /// Street number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
    /// Apartment, block, etc.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub complement: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_owned(),
            state: String::new(),
            city: String::new(),
            postal_code: String::new(),
            district: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
        }
    }
}

/// Shipping information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shipping {
    /// Shipping method.
    #[serde(rename = "type")]
    pub kind: ShippingType,
    /// Shipping cost, two-decimal text.
    pub cost: String,
    /// Delivery address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Shipping {
    /// Creates shipping without an address.
    pub fn new(kind: ShippingType, cost: Decimal) -> Self {
        Self { kind, cost: format_amount(cost), address: None }
    }

    /// Replaces the whole address. Country is reset to [`DEFAULT_COUNTRY`].
    #[allow(clippy::too_many_arguments, reason = "mirrors every address field")]
    pub fn set_address(
        &mut self,
        state: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        district: impl Into<String>,
        street: impl Into<String>,
        number: impl Into<String>,
        complement: impl Into<String>,
    ) -> &mut Self {
        self.address = Some(Address {
            country: DEFAULT_COUNTRY.to_owned(),
            state: state.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            district: district.into(),
            street: street.into(),
            number: number.into(),
            complement: complement.into(),
        });
        self
    }

    /// Sets state and city, creating an empty address first if needed.
    pub fn set_address_state_city(
        &mut self,
        state: impl Into<String>,
        city: impl Into<String>,
    ) -> &mut Self {
        let address = self.address_mut();
        address.state = state.into();
        address.city = city.into();
        self
    }

    /// Sets the country, creating an empty address first if needed.
    pub fn set_address_country(&mut self, country: impl Into<String>) -> &mut Self {
        self.address_mut().country = country.into();
        self
    }

    /// Sets the shipping cost.
    pub fn set_cost(&mut self, cost: Decimal) -> &mut Self {
        self.cost = format_amount(cost);
        self
    }

    /// Returns the address, inserting a default one if absent.
    pub fn address_mut(&mut self) -> &mut Address {
        self.address.get_or_insert_with(Address::default)
    }
}
