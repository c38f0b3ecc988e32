//! Row mapping for the `customers` collection.

use crate::model::Customer;
use crate::repo::store::{Collection, StoreResult, StoredRecord};
use rusqlite::types::Value;
use rusqlite::Row;

impl StoredRecord for Customer {
    const COLLECTION: Collection = Collection::Customers;
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "location",
        "phone",
        "email",
        "created_at",
        "updated_at",
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.name.clone()),
            Value::Text(self.location.clone()),
            self.phone.clone().map_or(Value::Null, Value::Text),
            self.email.clone().map_or(Value::Null, Value::Text),
            Value::Integer(self.created_at),
            Value::Integer(self.updated_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            location: row.get("location")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
