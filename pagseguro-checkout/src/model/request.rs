//! Checkout request aggregate, line items and metadata.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::{
    buyer::Buyer,
    shipping::{Shipping, ShippingType},
};
use crate::format::{format_amount, format_count};

/// Currency code used unless overridden.
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Default number of payment attempts allowed per checkout code.
pub const DEFAULT_MAX_USES: &str = "10";

/// Default lifetime of the checkout code, in seconds.
pub const DEFAULT_MAX_AGE: &str = "7200";

/// One purchased item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Merchant item id.
    pub id: String,
    /// Description shown to the buyer.
    pub description: String,
    /// Unit price, two-decimal text.
    pub amount: String,
    /// Quantity, integer text.
    pub quantity: String,
    /// Per-item shipping cost, two-decimal text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<String>,
    /// Weight in grams, integer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl LineItem {
    /// Creates an item from typed values.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount: format_amount(amount),
            quantity: format_count(quantity.into()),
            shipping_cost: None,
            weight: None,
        }
    }

    /// Sets the unit price.
    pub fn set_amount(&mut self, amount: Decimal) -> &mut Self {
        self.amount = format_amount(amount);
        self
    }

    /// Sets the quantity.
    pub fn set_quantity(&mut self, quantity: u32) -> &mut Self {
        self.quantity = format_count(quantity.into());
        self
    }

    /// Sets the per-item shipping cost.
    pub fn set_shipping_cost(&mut self, cost: Decimal) -> &mut Self {
        self.shipping_cost = Some(format_amount(cost));
        self
    }

    /// Sets the weight in grams.
    pub fn set_weight(&mut self, grams: u32) -> &mut Self {
        self.weight = Some(format_count(grams.into()));
        self
    }
}

/// Free-form key/value attribute, optionally grouping further entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Attribute key, e.g. `PASSENGER_CPF`.
    pub key: String,
    /// Attribute value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Nested entries, each rendered as a `<group>` element.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<Metadata>,
}

impl Metadata {
    /// Creates an entry. An empty value is treated as absent.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: non_empty(value.into()), group: Vec::new() }
    }

    /// Appends a nested entry and returns it.
    pub fn add_group_entry(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Metadata {
        push_last(&mut self.group, Metadata::new(key, value))
    }
}

/// Checkout request, rendered as the `<checkout>` document.
///
/// Field order matches element order on the wire.
///
/// # Examples
///
/// ```
/// use pagseguro_checkout::model::{CheckoutRequest, ShippingType};
/// use rust_decimal::Decimal;
///
/// let mut request = CheckoutRequest::new(
///     "SELLER-TOKEN",
///     "seller@example.com",
///     "ORDER-42",
///     "https://shop.example.com/thanks",
///     "https://shop.example.com/notify",
/// );
/// request.add_item("0001", "Notebook", Decimal::new(249990, 2), 1).set_weight(1500);
/// request.set_buyer("Maria Silva", "maria@example.com").set_cpf("12345678909");
/// request
///     .set_shipping(ShippingType::Sedex, Decimal::new(2500, 2))
///     .set_address_state_city("SP", "Sao Paulo");
///
/// assert_eq!(request.items[0].amount, "2499.90");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    /// Seller account email.
    pub email: String,
    /// Seller access token.
    pub token: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Purchased items.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "item_list")]
    pub items: Vec<LineItem>,
    /// Merchant reference echoed back in notifications.
    pub reference: String,
    /// Buyer.
    #[serde(rename = "sender", skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Shipping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
    /// Extra amount added to the total; negative for discounts.
    #[serde(rename = "extraAmount", skip_serializing_if = "Option::is_none")]
    pub extra_amount: Option<String>,
    /// Where the buyer lands after paying.
    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Where payment notifications are posted.
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    /// Payment attempts allowed for this reference (0–999).
    #[serde(rename = "maxUses", skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<String>,
    /// Lifetime of the returned code in seconds (30–999999999).
    #[serde(rename = "maxAge", skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    /// Extra attributes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
}

impl CheckoutRequest {
    /// Creates a request with default currency, max uses and max age.
    ///
    /// Empty callback URLs are left unset and omitted from the document.
    pub fn new(
        seller_token: impl Into<String>,
        seller_email: impl Into<String>,
        reference: impl Into<String>,
        redirect_url: impl Into<String>,
        notification_url: impl Into<String>,
    ) -> Self {
        Self {
            email: seller_email.into(),
            token: seller_token.into(),
            currency: DEFAULT_CURRENCY.to_owned(),
            items: Vec::new(),
            reference: reference.into(),
            buyer: None,
            shipping: None,
            extra_amount: None,
            redirect_url: non_empty(redirect_url.into()),
            notification_url: non_empty(notification_url.into()),
            max_uses: Some(DEFAULT_MAX_USES.to_owned()),
            max_age: Some(DEFAULT_MAX_AGE.to_owned()),
            metadata: Vec::new(),
        }
    }

    /// Appends an item and returns it for further configuration.
    pub fn add_item(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        quantity: u32,
    ) -> &mut LineItem {
        push_last(&mut self.items, LineItem::new(id, description, amount, quantity))
    }

    /// Sets the buyer, replacing any previous one.
    pub fn set_buyer(&mut self, name: impl Into<String>, email: impl Into<String>) -> &mut Buyer {
        self.buyer.insert(Buyer::new(name, email))
    }

    /// Sets shipping, replacing any previous one including its address.
    pub fn set_shipping(&mut self, kind: ShippingType, cost: Decimal) -> &mut Shipping {
        self.shipping.insert(Shipping::new(kind, cost))
    }

    /// Sets the extra amount (negative for a discount).
    pub fn set_extra_amount(&mut self, amount: Decimal) -> &mut Self {
        self.extra_amount = Some(format_amount(amount));
        self
    }

    /// Sets how many payment attempts the checkout code allows.
    pub fn set_max_uses(&mut self, max_uses: u32) -> &mut Self {
        self.max_uses = Some(format_count(max_uses.into()));
        self
    }

    /// Sets the checkout code lifetime in seconds.
    pub fn set_max_age(&mut self, seconds: u64) -> &mut Self {
        self.max_age = Some(format_count(seconds));
        self
    }

    /// Appends a metadata entry and returns it.
    pub fn add_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Metadata {
        push_last(&mut self.metadata, Metadata::new(key, value))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn push_last<T>(entries: &mut Vec<T>, entry: T) -> &mut T {
    entries.push(entry);
    let last = entries.len() - 1;
    &mut entries[last]
}

fn item_list<S: Serializer>(items: &[LineItem], serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct ItemList<'a> {
        item: &'a [LineItem],
    }

    ItemList { item: items }.serialize(serializer)
}
