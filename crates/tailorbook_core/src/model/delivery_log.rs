//! Delivery log for garments taken in and handed over.
//!
//! # Invariants
//! - `quantity >= 1`.
//! - `recipient_name` is non-blank when `delivery_mode == Other`.
//! - `delivery_date` is `Some` exactly when `status == Delivered`.
//! - `customer_id` is a plain reference; deleting the customer keeps the log.

use crate::model::customer::CustomerId;
use crate::model::validation::{require_non_empty, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Primary key of the delivery logs collection, e.g. `DEL-lq2k9x7QF3A1B`.
pub type DeliveryLogId = String;

/// Garment category. Persisted and serialized by its label (`"Dress 3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DressType {
    #[serde(rename = "Dress 1")]
    Dress1,
    #[serde(rename = "Dress 2")]
    Dress2,
    #[serde(rename = "Dress 3")]
    Dress3,
    #[serde(rename = "Dress 4")]
    Dress4,
    #[serde(rename = "Dress 5")]
    Dress5,
    #[serde(rename = "Dress 6")]
    Dress6,
    #[serde(rename = "Dress 7")]
    Dress7,
    #[serde(rename = "Dress 8")]
    Dress8,
    #[serde(rename = "Dress 9")]
    Dress9,
    #[serde(rename = "Dress 10")]
    Dress10,
}

impl DressType {
    pub const ALL: [DressType; 10] = [
        Self::Dress1,
        Self::Dress2,
        Self::Dress3,
        Self::Dress4,
        Self::Dress5,
        Self::Dress6,
        Self::Dress7,
        Self::Dress8,
        Self::Dress9,
        Self::Dress10,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dress1 => "Dress 1",
            Self::Dress2 => "Dress 2",
            Self::Dress3 => "Dress 3",
            Self::Dress4 => "Dress 4",
            Self::Dress5 => "Dress 5",
            Self::Dress6 => "Dress 6",
            Self::Dress7 => "Dress 7",
            Self::Dress8 => "Dress 8",
            Self::Dress9 => "Dress 9",
            Self::Dress10 => "Dress 10",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl Display for DressType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Who collects the finished garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Handed to the customer in person.
    Customer,
    /// Given to someone else; requires `recipient_name`.
    Other,
}

impl DeliveryMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Customer" => Some(Self::Customer),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Garment taken in, not yet handed over.
    Taken,
    Delivered,
}

impl DeliveryStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Taken => "Taken",
            Self::Delivered => "Delivered",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Taken" => Some(Self::Taken),
            "Delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

/// Stored delivery log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLog {
    pub id: DeliveryLogId,
    pub customer_id: CustomerId,
    pub dress_type: DressType,
    pub quantity: u32,
    pub delivery_mode: DeliveryMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    pub status: DeliveryStatus,
    /// Epoch milliseconds when the garment was taken in.
    pub taken_date: i64,
    /// Epoch milliseconds of hand-over; only set while `Delivered`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DeliveryLog {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        validate_delivery_fields(
            &self.customer_id,
            self.quantity,
            self.delivery_mode,
            self.recipient_name.as_deref(),
        )
    }

    /// Moves the log to `Delivered`, stamping `at` unless a date is already set.
    pub fn mark_delivered(&mut self, at: i64) {
        self.status = DeliveryStatus::Delivered;
        self.delivery_date = self.delivery_date.or(Some(at));
    }

    /// Moves the log back to `Taken` and clears the delivery date.
    pub fn mark_taken(&mut self) {
        self.status = DeliveryStatus::Taken;
        self.delivery_date = None;
    }

    /// Re-establishes the status/date invariant before a write.
    ///
    /// A `Delivered` log keeps its own date, falls back to `stored`, then to
    /// `now`. A `Taken` log never carries a date.
    pub(crate) fn normalize_delivery_date(&mut self, stored: Option<i64>, now: i64) {
        self.delivery_date = match self.status {
            DeliveryStatus::Delivered => self.delivery_date.or(stored).or(Some(now)),
            DeliveryStatus::Taken => None,
        };
    }
}

/// Input for creating a delivery log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeliveryLog {
    /// Generated with the `DEL` prefix when `None` or blank.
    #[serde(default)]
    pub id: Option<DeliveryLogId>,
    pub customer_id: CustomerId,
    pub dress_type: DressType,
    pub quantity: u32,
    pub delivery_mode: DeliveryMode,
    #[serde(default)]
    pub recipient_name: Option<String>,
    pub status: DeliveryStatus,
    /// Defaults to the creation time.
    #[serde(default)]
    pub taken_date: Option<i64>,
    #[serde(default)]
    pub delivery_date: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewDeliveryLog {
    /// One garment, collected by the customer, currently `Taken`.
    pub fn new(customer_id: impl Into<CustomerId>, dress_type: DressType) -> Self {
        Self {
            id: None,
            customer_id: customer_id.into(),
            dress_type,
            quantity: 1,
            delivery_mode: DeliveryMode::Customer,
            recipient_name: None,
            status: DeliveryStatus::Taken,
            taken_date: None,
            delivery_date: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_delivery_fields(
            &self.customer_id,
            self.quantity,
            self.delivery_mode,
            self.recipient_name.as_deref(),
        )
    }
}

fn validate_delivery_fields(
    customer_id: &str,
    quantity: u32,
    mode: DeliveryMode,
    recipient_name: Option<&str>,
) -> Result<(), ValidationError> {
    require_non_empty("customerId", customer_id)?;
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity(quantity));
    }
    if mode == DeliveryMode::Other && recipient_name.map_or(true, |name| name.trim().is_empty()) {
        return Err(ValidationError::MissingRecipient);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DeliveryMode, DeliveryStatus, DressType, NewDeliveryLog};
    use crate::model::ValidationError;

    #[test]
    fn dress_type_labels_round_trip() {
        for kind in DressType::ALL {
            assert_eq!(DressType::from_label(kind.label()), Some(kind));
        }
        assert_eq!(DressType::from_label("Dress 11"), None);
    }

    #[test]
    fn dress_type_serializes_as_label() {
        let value = serde_json::to_value(DressType::Dress10).unwrap();
        assert_eq!(value, "Dress 10");
    }

    #[test]
    fn other_mode_requires_recipient() {
        let mut draft = NewDeliveryLog::new("CUS-1", DressType::Dress2);
        draft.delivery_mode = DeliveryMode::Other;
        draft.recipient_name = Some("  ".to_string());
        assert_eq!(draft.validate(), Err(ValidationError::MissingRecipient));

        draft.recipient_name = Some("Wanjiru".to_string());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut draft = NewDeliveryLog::new("CUS-1", DressType::Dress1);
        draft.quantity = 0;
        assert_eq!(draft.validate(), Err(ValidationError::InvalidQuantity(0)));
    }

    #[test]
    fn new_draft_defaults_match_intake_form() {
        let draft = NewDeliveryLog::new("CUS-1", DressType::Dress1);
        assert_eq!(draft.quantity, 1);
        assert_eq!(draft.delivery_mode, DeliveryMode::Customer);
        assert_eq!(draft.status, DeliveryStatus::Taken);
    }
}
