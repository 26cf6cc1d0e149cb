//! Order intake validation.
//!
//! A [`CheckoutDraft`] is the raw, untrusted shape a client submits.
//! [`CheckoutDraft::validate`] checks every intake rule eagerly (no
//! short-circuiting, so the caller gets the full list of violations) and
//! on success produces a normalized [`CheckoutRequest`] with monetary
//! amounts coerced to two-decimal fixed point.

use bigdecimal::{BigDecimal, RoundingMode};
use uuid::Uuid;

use super::errors::Violation;

/// Half a cent. Client totals are accepted when they match the computed
/// sum within this tolerance, then re-derived from the rounded parts.
const MONEY_TOLERANCE: f64 = 0.005;

// ── Raw (untrusted) payload ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CheckoutItemDraft {
    pub product_id: Uuid,
    pub quantity: i64,
    pub price: f64,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddressDraft {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    pub items: Vec<CheckoutItemDraft>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping_cost: f64,
    pub total: f64,
    pub shipping_address: AddressDraft,
    pub billing_address: Option<AddressDraft>,
    pub email: String,
    pub payment_method: String,
    pub payment_ref: Option<String>,
}

// ── Normalized (validated) request ───────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CheckoutItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckoutAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub shipping_cost: BigDecimal,
    pub total: BigDecimal,
    pub shipping_address: CheckoutAddress,
    pub billing_address: Option<CheckoutAddress>,
    pub email: String,
    pub payment_method: String,
    pub payment_ref: Option<String>,
}

impl CheckoutDraft {
    /// Validate the draft against every intake rule and normalize it.
    ///
    /// Violations are collected, not short-circuited: a payload with a bad
    /// email *and* a zero quantity reports both.
    pub fn validate(self) -> Result<CheckoutRequest, Vec<Violation>> {
        let mut violations = Vec::new();

        if self.items.is_empty() {
            violations.push(Violation::new("items", "at least one line item is required"));
        }
        for (i, item) in self.items.iter().enumerate() {
            if item.quantity < 1 {
                violations.push(Violation::new(
                    format!("items[{i}].quantity"),
                    "quantity must be a positive integer",
                ));
            } else if item.quantity > i32::MAX as i64 {
                violations.push(Violation::new(
                    format!("items[{i}].quantity"),
                    "quantity is out of range",
                ));
            }
            if item.price < 0.0 {
                violations.push(Violation::new(
                    format!("items[{i}].price"),
                    "price must not be negative",
                ));
            }
            if item.name.trim().is_empty() {
                violations.push(Violation::new(
                    format!("items[{i}].name"),
                    "product name is required",
                ));
            }
        }

        if self.subtotal <= 0.0 {
            violations.push(Violation::new("subtotal", "subtotal must be positive"));
        }
        if self.tax < 0.0 {
            violations.push(Violation::new("tax", "tax must not be negative"));
        }
        if self.shipping_cost < 0.0 {
            violations.push(Violation::new("shippingCost", "shipping cost must not be negative"));
        }
        if self.total <= 0.0 {
            violations.push(Violation::new("total", "total must be positive"));
        }

        let computed = self.subtotal + self.tax + self.shipping_cost;
        if (computed - self.total).abs() > MONEY_TOLERANCE {
            violations.push(Violation::new(
                "total",
                format!(
                    "total {:.2} does not equal subtotal + tax + shipping cost ({:.2})",
                    self.total, computed
                ),
            ));
        }

        if !is_valid_email(self.email.trim()) {
            violations.push(Violation::new("email", "a well-formed email address is required"));
        }
        if self.payment_method.trim().is_empty() {
            violations.push(Violation::new("paymentMethod", "payment method is required"));
        }

        validate_address(&self.shipping_address, "shippingAddress", &mut violations);
        if let Some(billing) = &self.billing_address {
            validate_address(billing, "billingAddress", &mut violations);
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(CheckoutRequest {
            items: self
                .items
                .into_iter()
                .map(|item| CheckoutItem {
                    product_id: item.product_id,
                    quantity: item.quantity as i32,
                    price: to_money(item.price),
                    name: item.name.trim().to_string(),
                    image: item.image.filter(|s| !s.trim().is_empty()),
                })
                .collect(),
            subtotal: to_money(self.subtotal),
            tax: to_money(self.tax),
            shipping_cost: to_money(self.shipping_cost),
            total: to_money(self.total),
            shipping_address: normalize_address(self.shipping_address),
            billing_address: self.billing_address.map(normalize_address),
            email: self.email.trim().to_string(),
            payment_method: self.payment_method.trim().to_string(),
            payment_ref: self.payment_ref.filter(|s| !s.trim().is_empty()),
        })
    }
}

fn validate_address(address: &AddressDraft, prefix: &str, violations: &mut Vec<Violation>) {
    let required = [
        ("firstName", &address.first_name),
        ("lastName", &address.last_name),
        ("address1", &address.address1),
        ("city", &address.city),
        ("state", &address.state),
        ("postalCode", &address.postal_code),
        ("country", &address.country),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            violations.push(Violation::new(
                format!("{prefix}.{field}"),
                format!("{field} is required"),
            ));
        }
    }
}

fn normalize_address(address: AddressDraft) -> CheckoutAddress {
    CheckoutAddress {
        first_name: address.first_name.trim().to_string(),
        last_name: address.last_name.trim().to_string(),
        address1: address.address1.trim().to_string(),
        address2: address.address2.filter(|s| !s.trim().is_empty()),
        city: address.city.trim().to_string(),
        state: address.state.trim().to_string(),
        postal_code: address.postal_code.trim().to_string(),
        country: address.country.trim().to_string(),
        phone: address.phone.filter(|s| !s.trim().is_empty()),
    }
}

/// Coerce a client-supplied amount to two-decimal fixed point.
fn to_money(value: f64) -> BigDecimal {
    BigDecimal::try_from(value)
        .unwrap_or_else(|_| BigDecimal::from(0))
        .with_scale_round(2, RoundingMode::HalfUp)
}

/// Structural email check: a non-empty local part and a dotted domain.
/// Deliverability is the notifier's problem, not intake's.
fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || s.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn address() -> AddressDraft {
        AddressDraft {
            first_name: "Amara".into(),
            last_name: "Okafor".into(),
            address1: "12 Harbor Way".into(),
            address2: None,
            city: "Portland".into(),
            state: "OR".into(),
            postal_code: "97201".into(),
            country: "US".into(),
            phone: None,
        }
    }

    fn draft() -> CheckoutDraft {
        CheckoutDraft {
            items: vec![CheckoutItemDraft {
                product_id: Uuid::new_v4(),
                quantity: 2,
                price: 100.0,
                name: "Premium Lightweight Wheelchair".into(),
                image: Some("/images/products/wheelchair.jpg".into()),
            }],
            subtotal: 200.0,
            tax: 16.0,
            shipping_cost: 0.0,
            total: 216.0,
            shipping_address: address(),
            billing_address: None,
            email: "amara@example.com".into(),
            payment_method: "card".into(),
            payment_ref: None,
        }
    }

    fn violated_fields(result: Result<CheckoutRequest, Vec<Violation>>) -> Vec<String> {
        result
            .expect_err("expected validation to fail")
            .into_iter()
            .map(|v| v.field)
            .collect()
    }

    #[test]
    fn valid_draft_normalizes_money_to_two_decimals() {
        let request = draft().validate().expect("draft should validate");
        assert_eq!(request.subtotal, BigDecimal::from_str("200.00").unwrap());
        assert_eq!(request.total, BigDecimal::from_str("216.00").unwrap());
        assert_eq!(request.items[0].price, BigDecimal::from_str("100.00").unwrap());
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn total_mismatch_is_rejected() {
        // total says 216 but the parts sum to 215
        let mut d = draft();
        d.subtotal = 199.0;
        let fields = violated_fields(d.validate());
        assert_eq!(fields, vec!["total"]);
    }

    #[test]
    fn total_within_half_cent_is_accepted() {
        let mut d = draft();
        d.total = 216.004;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn empty_items_are_rejected() {
        let mut d = draft();
        d.items.clear();
        // subtotal/total still consistent, so only the items rule fires
        assert_eq!(violated_fields(d.validate()), vec!["items"]);
    }

    #[test]
    fn zero_quantity_and_bad_email_are_both_reported() {
        let mut d = draft();
        d.items[0].quantity = 0;
        d.email = "not-an-address".into();
        let fields = violated_fields(d.validate());
        assert!(fields.contains(&"items[0].quantity".to_string()));
        assert!(fields.contains(&"email".to_string()));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut d = draft();
        d.items[0].price = -1.0;
        let fields = violated_fields(d.validate());
        assert!(fields.contains(&"items[0].price".to_string()));
    }

    #[test]
    fn blank_address_fields_are_reported_by_path() {
        let mut d = draft();
        d.shipping_address.city = "   ".into();
        d.shipping_address.postal_code = String::new();
        let fields = violated_fields(d.validate());
        assert!(fields.contains(&"shippingAddress.city".to_string()));
        assert!(fields.contains(&"shippingAddress.postalCode".to_string()));
    }

    #[test]
    fn billing_address_is_optional_but_validated_when_present() {
        let mut d = draft();
        let mut billing = address();
        billing.country = String::new();
        d.billing_address = Some(billing);
        let fields = violated_fields(d.validate());
        assert_eq!(fields, vec!["billingAddress.country"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@shop.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("spaced name@example.com"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let mut d = draft();
        d.items[0].image = Some("  ".into());
        d.payment_ref = Some(String::new());
        d.shipping_address.phone = Some(" ".into());
        let request = d.validate().expect("draft should validate");
        assert!(request.items[0].image.is_none());
        assert!(request.payment_ref.is_none());
        assert!(request.shipping_address.phone.is_none());
    }
}
