//! Order submission types.
//!
//! Orders are captured server-side for record keeping, but the storefront's
//! real submission channel is the checkout messaging handoff; the API record
//! is advisory.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, ValidationError};

/// Minimum digits for a contact phone number.
pub const PHONE_MIN: usize = 6;

/// One line of a submitted order, captured from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
}

/// Who to reach about the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payload for `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub contact: Contact,
}

impl OrderDraft {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: at least one item, non-empty contact
    /// name, phone of at least six characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::new("items", "must not be empty"));
        }
        if self.contact.name.trim().is_empty() {
            return Err(ValidationError::new("contact.name", "must not be empty"));
        }
        if self.contact.phone.trim().len() < PHONE_MIN {
            return Err(ValidationError::new(
                "contact.phone",
                format!("must be at least {PHONE_MIN} characters"),
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a captured order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Freshly captured, nobody has looked at it yet.
    #[default]
    Received,
    Confirmed,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    /// The wire/database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Confirmed => "confirmed",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(Self::Received),
            "confirmed" => Ok(Self::Confirmed),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft {
            items: vec![OrderItem {
                product_id: ProductId::new(1),
                name: "Isigny Croissant".to_owned(),
                quantity: 2,
                unit_price: Price::new("5.5".parse().unwrap()),
            }],
            contact: Contact {
                name: "Dewi".to_owned(),
                phone: "+62 812 3456".to_owned(),
                email: None,
                note: None,
            },
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut d = draft();
        d.items.clear();
        assert_eq!(d.validate().unwrap_err().field, "items");
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut d = draft();
        d.contact.phone = "12345".to_owned();
        assert_eq!(d.validate().unwrap_err().field, "contact.phone");
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Received,
            OrderStatus::Confirmed,
            OrderStatus::Fulfilled,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!(OrderStatus::default(), OrderStatus::Received);
    }
}
