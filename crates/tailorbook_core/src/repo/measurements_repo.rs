//! Row mapping for the `measurements` collection.
//!
//! Numeric columns follow [`MEASUREMENT_FIELDS`] order between the key and
//! the trailing `notes`/`updated_at` columns.

use crate::model::{Measurements, MEASUREMENT_FIELDS};
use crate::repo::store::{Collection, StoreResult, StoredRecord};
use rusqlite::types::Value;
use rusqlite::Row;

impl StoredRecord for Measurements {
    const COLLECTION: Collection = Collection::Measurements;
    const COLUMNS: &'static [&'static str] = &[
        "customer_id",
        "chest",
        "waist",
        "hips",
        "shoulder",
        "sleeve",
        "neck",
        "inseam",
        "outseam",
        "thigh",
        "calf",
        "ankle",
        "bicep",
        "wrist",
        "height",
        "notes",
        "updated_at",
    ];

    fn key(&self) -> &str {
        &self.customer_id
    }

    fn to_values(&self) -> Vec<Value> {
        let mut values = Vec::with_capacity(Self::COLUMNS.len());
        values.push(Value::Text(self.customer_id.clone()));
        values.extend(
            self.values()
                .into_iter()
                .map(|(_, value)| value.map_or(Value::Null, Value::Real)),
        );
        values.push(self.notes.clone().map_or(Value::Null, Value::Text));
        values.push(Value::Integer(self.updated_at));
        values
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let mut sheet = Self::new(row.get::<_, String>("customer_id")?);
        let [
            chest,
            waist,
            hips,
            shoulder,
            sleeve,
            neck,
            inseam,
            outseam,
            thigh,
            calf,
            ankle,
            bicep,
            wrist,
            height,
        ] = MEASUREMENT_FIELDS;
        sheet.chest = row.get(chest)?;
        sheet.waist = row.get(waist)?;
        sheet.hips = row.get(hips)?;
        sheet.shoulder = row.get(shoulder)?;
        sheet.sleeve = row.get(sleeve)?;
        sheet.neck = row.get(neck)?;
        sheet.inseam = row.get(inseam)?;
        sheet.outseam = row.get(outseam)?;
        sheet.thigh = row.get(thigh)?;
        sheet.calf = row.get(calf)?;
        sheet.ankle = row.get(ankle)?;
        sheet.bicep = row.get(bicep)?;
        sheet.wrist = row.get(wrist)?;
        sheet.height = row.get(height)?;
        sheet.notes = row.get("notes")?;
        sheet.updated_at = row.get("updated_at")?;
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Measurements, MEASUREMENT_FIELDS};
    use crate::repo::store::StoredRecord;

    #[test]
    fn numeric_columns_match_field_order() {
        let columns = Measurements::COLUMNS;
        assert_eq!(columns.len(), MEASUREMENT_FIELDS.len() + 3);
        assert_eq!(&columns[1..=MEASUREMENT_FIELDS.len()], &MEASUREMENT_FIELDS[..]);
    }
}
