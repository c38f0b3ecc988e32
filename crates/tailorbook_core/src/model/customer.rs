//! Customer record.
//!
//! # Invariants
//! - `id` is unique across the customers collection.
//! - `name` and `location` are non-blank.
//! - `updated_at >= created_at`; both are assigned by the service layer.

use crate::model::validation::{require_non_empty, validate_email, ValidationError};
use serde::{Deserialize, Serialize};

/// Primary key of the customers collection, e.g. `CUS-lq2k9x7QF3A1B`.
pub type CustomerId = String;

/// Stored customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

impl Customer {
    /// Checks caller-controlled fields. Timestamps are not inspected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        require_non_empty("location", &self.location)?;
        if let Some(email) = self.email.as_deref() {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Case-insensitive substring match over `id`, `name` and `location`.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.id, &self.name, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Input for creating a customer.
///
/// Timestamps are absent on purpose: the service always assigns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Generated with the `CUS` prefix when `None` or blank.
    #[serde(default)]
    pub id: Option<CustomerId>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Same as [`NewCustomer::new`] with a caller-assigned primary key.
    pub fn with_id(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(name, location)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Customer;
    use crate::model::ValidationError;

    fn customer() -> Customer {
        Customer {
            id: "CUS-1".to_string(),
            name: "Asha".to_string(),
            location: "Nairobi".to_string(),
            phone: None,
            email: None,
            created_at: 10,
            updated_at: 10,
        }
    }

    #[test]
    fn validate_rejects_blank_location() {
        let mut record = customer();
        record.location = " ".to_string();
        assert_eq!(
            record.validate(),
            Err(ValidationError::MissingField("location"))
        );
    }

    #[test]
    fn matches_any_searchable_field() {
        let record = customer();
        assert!(record.matches_lowercase("cus-"));
        assert!(record.matches_lowercase("ash"));
        assert!(record.matches_lowercase("nairobi"));
        assert!(!record.matches_lowercase("mombasa"));
    }

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let value = serde_json::to_value(customer()).unwrap();
        assert_eq!(value["createdAt"], 10);
        assert_eq!(value["updatedAt"], 10);
        assert!(value.get("phone").is_none());
    }
}
