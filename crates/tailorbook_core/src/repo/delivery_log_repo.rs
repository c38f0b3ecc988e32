//! Row mapping for the `delivery_logs` collection.
//!
//! Enums are stored as their labels; unknown labels are rejected on read
//! instead of being coerced to a default.

use crate::model::{DeliveryLog, DeliveryMode, DeliveryStatus, DressType};
use crate::repo::store::{Collection, StoreResult, StoredRecord, TransactionFailure};
use rusqlite::types::Value;
use rusqlite::Row;

impl StoredRecord for DeliveryLog {
    const COLLECTION: Collection = Collection::DeliveryLogs;
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "customer_id",
        "dress_type",
        "quantity",
        "delivery_mode",
        "recipient_name",
        "status",
        "taken_date",
        "delivery_date",
        "notes",
        "created_at",
        "updated_at",
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.customer_id.clone()),
            Value::Text(self.dress_type.label().to_string()),
            Value::Integer(i64::from(self.quantity)),
            Value::Text(self.delivery_mode.label().to_string()),
            self.recipient_name.clone().map_or(Value::Null, Value::Text),
            Value::Text(self.status.label().to_string()),
            Value::Integer(self.taken_date),
            self.delivery_date.map_or(Value::Null, Value::Integer),
            self.notes.clone().map_or(Value::Null, Value::Text),
            Value::Integer(self.created_at),
            Value::Integer(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let id: String = row.get("id")?;

        let dress_text: String = row.get("dress_type")?;
        let dress_type = DressType::from_label(&dress_text)
            .ok_or_else(|| invalid(&id, "dress_type", &dress_text))?;

        let mode_text: String = row.get("delivery_mode")?;
        let delivery_mode = DeliveryMode::from_label(&mode_text)
            .ok_or_else(|| invalid(&id, "delivery_mode", &mode_text))?;

        let status_text: String = row.get("status")?;
        let status = DeliveryStatus::from_label(&status_text)
            .ok_or_else(|| invalid(&id, "status", &status_text))?;

        let quantity_raw: i64 = row.get("quantity")?;
        let quantity = u32::try_from(quantity_raw)
            .map_err(|_| invalid(&id, "quantity", &quantity_raw.to_string()))?;

        Ok(Self {
            customer_id: row.get("customer_id")?,
            dress_type,
            quantity,
            delivery_mode,
            recipient_name: row.get("recipient_name")?,
            status,
            taken_date: row.get("taken_date")?,
            delivery_date: row.get("delivery_date")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            id,
        })
    }
}

fn invalid(id: &str, column: &str, value: &str) -> TransactionFailure {
    TransactionFailure::InvalidData(format!(
        "invalid value `{value}` in delivery_logs.{column} for `{id}`"
    ))
}
