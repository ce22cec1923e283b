//! Request and response types for the Openpay customers API.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::merchant::Merchant;

/// An Openpay customer.
///
/// Read-only fields (`id`, `creation_date`, `status`, `balance`, `clabe`,
/// `store`) are accepted from responses but never sent, so a `Customer` can be
/// passed as the body of [`Merchant::update_customer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Customer ID.
    #[serde(skip_serializing, deserialize_with = "null_as_default")]
    pub id: String,
    /// When the customer was created.
    #[serde(skip_serializing)]
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// First name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Last name.
    #[serde(skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "is_blank")]
    pub phone_number: Option<String>,
    /// Account status (e.g. `"active"`).
    #[serde(skip_serializing)]
    pub status: Option<String>,
    /// Account balance, when the customer has an account.
    #[serde(skip_serializing)]
    pub balance: Option<f64>,
    /// CLABE interbank account number.
    #[serde(skip_serializing)]
    pub clabe: Option<String>,
    /// Postal address.
    #[serde(skip_serializing_if = "address_is_empty")]
    pub address: Option<Address>,
    /// Store payment reference.
    #[serde(skip_serializing)]
    pub store: Option<StoreReference>,

    /// Set automatically when obtained through a [`Merchant`]. Customers built
    /// by hand need one attached before calling [`Customer::charge`].
    #[serde(skip)]
    pub merchant: Option<Merchant>,
}

impl Customer {
    /// Attach a merchant, consuming and returning the customer.
    #[must_use]
    pub fn with_merchant(mut self, merchant: Merchant) -> Self {
        self.merchant = Some(merchant);
        self
    }

    /// Attach a merchant in place.
    pub fn set_merchant(&mut self, merchant: Merchant) {
        self.merchant = Some(merchant);
    }
}

/// A customer's postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// First address line.
    #[serde(deserialize_with = "null_as_default")]
    pub line1: String,
    /// Second address line.
    #[serde(skip_serializing_if = "is_blank")]
    pub line2: Option<String>,
    /// Third address line.
    #[serde(skip_serializing_if = "is_blank")]
    pub line3: Option<String>,
    /// Postal code.
    #[serde(deserialize_with = "null_as_default")]
    pub postal_code: String,
    /// State.
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    /// City.
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
}

impl Address {
    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line1.is_empty()
            && is_blank(&self.line2)
            && is_blank(&self.line3)
            && self.postal_code.is_empty()
            && self.state.is_empty()
            && self.city.is_empty()
            && self.country_code.is_empty()
    }
}

/// Store payment reference for a customer. Received only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreReference {
    /// Reference to present at the store.
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    /// Barcode image URL.
    #[serde(deserialize_with = "null_as_default")]
    pub barcode_url: String,
    /// Paybin reference.
    pub paybin_reference: Option<String>,
    /// Paybin barcode image URL.
    pub barcode_paybin_url: Option<String>,
}

/// Body sent when creating a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerArgs {
    /// Caller-side identifier.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub external_id: Option<String>,
    /// First name.
    pub name: String,
    /// Last name.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub last_name: Option<String>,
    /// Email address.
    pub email: String,
    /// Whether Openpay should open an account for the customer.
    ///
    /// The wire name keeps Openpay's spelling.
    #[serde(rename = "requires_acount", default)]
    pub requires_account: bool,
    /// Phone number.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub phone_number: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "address_is_empty")]
    pub address: Option<Address>,
}

impl CustomerArgs {
    /// Arguments with only the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Set the external identifier.
    #[must_use]
    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Set the address.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Request an Openpay account for the customer.
    #[must_use]
    pub fn requiring_account(mut self) -> Self {
        self.requires_account = true;
        self
    }
}

/// Payment method of a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeMethod {
    /// Card charge, `source_id` is the card or token ID.
    Card,
    /// Cash payment at a convenience store.
    Store,
    /// SPEI bank transfer.
    BankAccount,
}

/// Body sent when charging a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeArgs {
    /// Card or token ID. Required for card charges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Payment method.
    pub method: ChargeMethod,
    /// Amount to charge.
    pub amount: f64,
    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Charge description.
    pub description: String,
    /// Caller-side order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Anti-fraud device session ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_session_id: Option<String>,
}

impl ChargeArgs {
    /// A card charge against `source_id`.
    #[must_use]
    pub fn card(
        source_id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        device_session_id: impl Into<String>,
    ) -> Self {
        Self {
            source_id: Some(source_id.into()),
            method: ChargeMethod::Card,
            amount,
            currency: None,
            description: description.into(),
            order_id: None,
            device_session_id: Some(device_session_id.into()),
        }
    }

    /// A cash payment at a convenience store. The response carries the
    /// store reference to pay against.
    #[must_use]
    pub fn store(amount: f64, description: impl Into<String>) -> Self {
        Self::without_source(ChargeMethod::Store, amount, description)
    }

    /// A SPEI bank transfer. The response carries the CLABE to pay into.
    #[must_use]
    pub fn bank_account(amount: f64, description: impl Into<String>) -> Self {
        Self::without_source(ChargeMethod::BankAccount, amount, description)
    }

    fn without_source(method: ChargeMethod, amount: f64, description: impl Into<String>) -> Self {
        Self {
            source_id: None,
            method,
            amount,
            currency: None,
            description: description.into(),
            order_id: None,
            device_session_id: None,
        }
    }

    /// Set the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the order identifier.
    #[must_use]
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

/// Result of a charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Charge {
    /// Transaction ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Authorization code, absent on failed charges.
    pub authorization: Option<String>,
    /// Operation type (`in` or `out`).
    #[serde(deserialize_with = "null_as_default")]
    pub operation_type: String,
    /// Payment method.
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    /// Transaction type (`charge`).
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_type: String,
    /// Card used, for card charges.
    pub card: Option<ChargeCard>,
    /// Transaction status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Whether the charge has been conciliated.
    #[serde(deserialize_with = "null_as_default")]
    pub conciliated: bool,
    /// When the charge was created.
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// When the charge was operated.
    pub operation_date: Option<DateTime<FixedOffset>>,
    /// Charge description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Failure reason. Present only on failed charges.
    pub error_message: Option<String>,
    /// Caller-side order identifier.
    pub order_id: Option<String>,
    /// Customer charged.
    pub customer_id: Option<String>,
    /// Charged amount.
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    /// ISO 4217 currency code.
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Fee breakdown.
    pub fee: Option<Fee>,
}

impl Charge {
    /// Whether Openpay reported the charge as failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error_message.is_some() || self.status == "failed"
    }
}

/// Snapshot of the card used in a charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeCard {
    /// Card ID.
    pub id: Option<String>,
    /// Card type (`debit`, `credit`).
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub card_type: String,
    /// Card brand.
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    /// Billing address.
    pub address: Option<Address>,
    /// Masked card number.
    #[serde(deserialize_with = "null_as_default")]
    pub card_number: String,
    /// Card holder name.
    #[serde(deserialize_with = "null_as_default")]
    pub holder_name: String,
    /// Two-digit expiration year.
    #[serde(deserialize_with = "null_as_default")]
    pub expiration_year: String,
    /// Two-digit expiration month.
    #[serde(deserialize_with = "null_as_default")]
    pub expiration_month: String,
    /// Whether the card accepts charges.
    #[serde(deserialize_with = "null_as_default")]
    pub allows_charges: bool,
    /// Whether the card accepts payouts.
    #[serde(deserialize_with = "null_as_default")]
    pub allows_payouts: bool,
    /// When the card was registered.
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// Issuing bank name.
    #[serde(deserialize_with = "null_as_default")]
    pub bank_name: String,
    /// Points program type.
    pub points_type: Option<String>,
    /// Whether the card supports points.
    #[serde(deserialize_with = "null_as_default")]
    pub points_card: bool,
    /// Owning customer.
    pub customer_id: Option<String>,
    /// Issuing bank code.
    #[serde(deserialize_with = "null_as_default")]
    pub bank_code: String,
}

/// Fee charged by Openpay for a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fee {
    /// Fee amount.
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    /// Tax on the fee.
    #[serde(deserialize_with = "null_as_default")]
    pub tax: f64,
}

/// Decode JSON `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[allow(clippy::ref_option)]
fn address_is_empty(value: &Option<Address>) -> bool {
    value.as_ref().map_or(true, Address::is_empty)
}
