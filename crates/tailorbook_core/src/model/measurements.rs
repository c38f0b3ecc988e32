//! Body measurements, a 1:1 extension of [`Customer`](crate::Customer).
//!
//! # Invariants
//! - Keyed by `customer_id`; one record per customer.
//! - Present numeric values are finite and non-negative (inches).

use crate::model::customer::CustomerId;
use crate::model::validation::{require_non_empty, ValidationError};
use serde::{Deserialize, Serialize};

/// Column/field names of the numeric measurements, in storage order.
pub const MEASUREMENT_FIELDS: [&str; 14] = [
    "chest", "waist", "hips", "shoulder", "sleeve", "neck", "inseam", "outseam", "thigh", "calf",
    "ankle", "bicep", "wrist", "height",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub customer_id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outseam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thigh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ankle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bicep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Epoch milliseconds, assigned on every save.
    #[serde(default)]
    pub updated_at: i64,
}

impl Measurements {
    /// Empty measurement sheet for one customer.
    pub fn new(customer_id: impl Into<CustomerId>) -> Self {
        Self {
            customer_id: customer_id.into(),
            ..Self::default()
        }
    }

    /// Numeric values paired with their names, in [`MEASUREMENT_FIELDS`] order.
    pub fn values(&self) -> [(&'static str, Option<f64>); 14] {
        let values = [
            self.chest,
            self.waist,
            self.hips,
            self.shoulder,
            self.sleeve,
            self.neck,
            self.inseam,
            self.outseam,
            self.thigh,
            self.calf,
            self.ankle,
            self.bicep,
            self.wrist,
            self.height,
        ];
        std::array::from_fn(|index| (MEASUREMENT_FIELDS[index], values[index]))
    }

    /// Whether no numeric value and no notes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, value)| value.is_none()) && self.notes.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("customerId", &self.customer_id)?;
        for (field, value) in self.values() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidMeasurement { field, value });
                }
            }
        }
        Ok(())
    }
}
