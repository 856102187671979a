//! Checkout form and order submission.
//!
//! Validation runs "on touched": a field reports its error only after
//! it has been blurred (or after a submit attempt), then re-validates on
//! every change. Submitting touches every field.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use shop_client::StorefrontApi;
use shop_commerce::{OrderReceipt, OrderSubmission, OrderUser};

use crate::cart::CartStore;
use crate::error::ShopError;
use crate::notify::{Action, Notice};

/// Success message after an order is placed.
pub const ORDER_SUBMITTED: &str = "Order submitted";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

// Landline 0[2-8] + 7 digits, or mobile 09 + 8 digits.
static TEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[2-8]\d{7}|09\d{8})$").expect("phone pattern"));

/// Checkout form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Name,
    Tel,
    Address,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Email,
        Field::Name,
        Field::Tel,
        Field::Address,
        Field::Message,
    ];

    /// Wire / input name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Name => "name",
            Field::Tel => "tel",
            Field::Address => "address",
            Field::Message => "message",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Name => "Recipient name",
            Field::Tel => "Phone",
            Field::Address => "Address",
            Field::Message => "Message",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Message)
    }

    /// Validate a value for this field.
    pub fn validate(&self, value: &str) -> Option<&'static str> {
        let missing = value.trim().is_empty();
        match self {
            Field::Email if missing => Some("Email is required"),
            Field::Email if !EMAIL_PATTERN.is_match(value) => Some("Email format is invalid"),
            Field::Name if missing => Some("Recipient name is required"),
            Field::Tel if missing => Some("Phone is required"),
            Field::Tel if !TEL_PATTERN.is_match(value) => Some("Phone number is invalid"),
            Field::Address if missing => Some("Address is required"),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, &'static str>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Checkout form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    email: String,
    name: String,
    tel: String,
    address: String,
    message: String,
    touched: BTreeSet<Field>,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Name => &self.name,
            Field::Tel => &self.tel,
            Field::Address => &self.address,
            Field::Message => &self.message,
        }
    }

    /// Change a field's value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Email => self.email = value,
            Field::Name => self.name = value,
            Field::Tel => self.tel = value,
            Field::Address => self.address = value,
            Field::Message => self.message = value,
        }
    }

    /// Mark a field as blurred.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// The error to show under a field, if it has been touched.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        if !self.is_touched(field) {
            return None;
        }
        field.validate(self.value(field))
    }

    /// Errors currently shown.
    pub fn visible_errors(&self) -> FormErrors {
        FormErrors(
            Field::ALL
                .iter()
                .filter_map(|field| self.error(*field).map(|message| (*field, message)))
                .collect(),
        )
    }

    /// Every validation error, touched or not.
    pub fn validate(&self) -> FormErrors {
        FormErrors(
            Field::ALL
                .iter()
                .filter_map(|field| field.validate(self.value(*field)).map(|m| (*field, m)))
                .collect(),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self, cart_is_empty: bool) -> bool {
        !cart_is_empty && self.is_valid()
    }

    /// Touch every field and build the order payload.
    pub fn submit(&mut self) -> Result<OrderSubmission, FormErrors> {
        self.touched.extend(Field::ALL);
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let user = OrderUser {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            tel: self.tel.clone(),
            address: self.address.trim().to_string(),
        };
        Ok(OrderSubmission::new(user, self.message.trim()))
    }

    /// Back to empty values with nothing touched.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Place an order for the current cart.
///
/// The cart and the form change only after the server confirms the order.
/// When it does, the cart is emptied through the store (skipped if the
/// server already emptied it) and the form is reset. A rejected order
/// leaves both untouched and raises one error notice.
pub async fn submit_order<A: StorefrontApi>(
    form: &mut CheckoutForm,
    store: &CartStore<A>,
) -> Result<OrderReceipt, ShopError> {
    if store.snapshot().is_empty() {
        return Err(ShopError::EmptyCart);
    }
    let order = form.submit().map_err(ShopError::InvalidForm)?;

    let receipt = match store.api().place_order(&order).await {
        Ok(receipt) => receipt,
        Err(err) => {
            tracing::warn!(error = %err, "order submission failed");
            store.notifier().notify(Notice::failure(Action::PlaceOrder));
            return Err(err.into());
        }
    };
    tracing::info!(order_id = %receipt.order_id, total = receipt.total.value(), "order placed");

    let still_filled = match store.refresh().await {
        Ok(_) => !store.snapshot().is_empty(),
        Err(_) => true,
    };
    if still_filled {
        if let Err(err) = store.clear().await {
            tracing::debug!(error = %err, "cart clear after order failed");
        }
    }

    form.reset();
    store.notifier().notify(Notice::success(ORDER_SUBMITTED));
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        let mut form = CheckoutForm::new();
        form.set(Field::Email, "buyer@example.com");
        form.set(Field::Name, "Lin");
        form.set(Field::Tel, "0912345678");
        form.set(Field::Address, "No. 1, Section 1, Taipei");
        form.set(Field::Message, "Leave at the door");
        form
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(Field::Email.validate(""), Some("Email is required"));
        assert_eq!(Field::Email.validate("buyer@"), Some("Email format is invalid"));
        assert_eq!(Field::Email.validate("a.b+c@shop.co"), None);
    }

    #[test]
    fn test_tel_rules() {
        assert_eq!(Field::Tel.validate(""), Some("Phone is required"));
        assert_eq!(Field::Tel.validate("0223456789"), Some("Phone number is invalid"));
        assert_eq!(Field::Tel.validate("091234567"), Some("Phone number is invalid"));
        assert_eq!(Field::Tel.validate("012345678"), Some("Phone number is invalid"));
        assert_eq!(Field::Tel.validate("022345678"), None);
        assert_eq!(Field::Tel.validate("0912345678"), None);
    }

    #[test]
    fn test_message_is_optional() {
        assert!(!Field::Message.is_required());
        assert_eq!(Field::Message.validate(""), None);
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = CheckoutForm::new();
        assert_eq!(form.error(Field::Email), None);
        assert!(!form.is_valid());

        form.touch(Field::Email);
        assert_eq!(form.error(Field::Email), Some("Email is required"));

        form.set(Field::Email, "nope");
        assert_eq!(form.error(Field::Email), Some("Email format is invalid"));

        form.set(Field::Email, "buyer@example.com");
        assert_eq!(form.error(Field::Email), None);
        assert!(form.visible_errors().is_empty());
    }

    #[test]
    fn test_can_submit_needs_valid_form_and_cart() {
        let form = filled();
        assert!(form.can_submit(false));
        assert!(!form.can_submit(true));

        let mut broken = filled();
        broken.set(Field::Address, "   ");
        assert!(!broken.can_submit(false));
    }

    #[test]
    fn test_submit_touches_everything_on_failure() {
        let mut form = CheckoutForm::new();
        form.set(Field::Email, "buyer@example.com");

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Tel), Some("Phone is required"));
        assert!(form.is_touched(Field::Address));
        assert_eq!(form.visible_errors(), errors);
        assert!(errors.to_string().starts_with("name: Recipient name is required"));
    }

    #[test]
    fn test_submit_splits_message_from_user() {
        let mut form = filled();
        let order = form.submit().unwrap();
        assert_eq!(order.user.email, "buyer@example.com");
        assert_eq!(order.user.tel, "0912345678");
        assert_eq!(order.message, "Leave at the door");
        // Submitting alone does not clear anything.
        assert_eq!(form.value(Field::Name), "Lin");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = filled();
        form.touch(Field::Name);
        form.reset();
        assert_eq!(form, CheckoutForm::default());
        assert_eq!(form.value(Field::Email), "");
    }
}
