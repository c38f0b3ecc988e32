mod common;

use common::{service, START_MS};
use tailorbook_core::{Measurements, RecordsError, ValidationError};

#[test]
fn add_or_update_measurements_upserts_and_stamps_updated_at() {
    let (service, clock) = service();
    let mut sheet = Measurements::new("CUS-1");
    sheet.chest = Some(38.0);
    sheet.updated_at = 1;

    let saved = service.add_or_update_measurements(&sheet).unwrap();
    assert_eq!(saved.updated_at, START_MS);

    let later = clock.advance(30_000);
    let mut edited = saved.clone();
    edited.waist = Some(32.5);
    edited.notes = Some("  ".to_string());
    let resaved = service.add_or_update_measurements(&edited).unwrap();

    let loaded = service.get_measurements("CUS-1").unwrap().unwrap();
    assert_eq!(loaded, resaved);
    assert_eq!(loaded.chest, Some(38.0));
    assert_eq!(loaded.waist, Some(32.5));
    assert_eq!(loaded.notes, None);
    assert_eq!(loaded.updated_at, later);
}

#[test]
fn measurements_reject_negative_values() {
    let (service, _clock) = service();
    let mut sheet = Measurements::new("CUS-1");
    sheet.sleeve = Some(-3.0);

    let err = service.add_or_update_measurements(&sheet).unwrap_err();

    assert!(matches!(
        err,
        RecordsError::Validation(ValidationError::InvalidMeasurement { field: "sleeve", .. })
    ));
    assert!(service.get_measurements("CUS-1").unwrap().is_none());
}

#[test]
fn measurements_require_customer_id() {
    let (service, _clock) = service();

    let err = service
        .add_or_update_measurements(&Measurements::new(""))
        .unwrap_err();

    assert!(matches!(
        err,
        RecordsError::Validation(ValidationError::MissingField("customerId"))
    ));
}

#[test]
fn delete_measurements_reports_whether_a_sheet_existed() {
    let (service, _clock) = service();
    service
        .add_or_update_measurements(&Measurements::new("CUS-1"))
        .unwrap();

    assert!(service.delete_measurements("CUS-1").unwrap());
    assert!(!service.delete_measurements("CUS-1").unwrap());
    assert!(service.get_measurements("CUS-1").unwrap().is_none());
}
