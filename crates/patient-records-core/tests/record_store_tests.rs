//! Record store and statistics integration tests.

use patient_records_core::db::{RecordStore, StoreErrorKind, ADD_DATE_FORMAT};
use patient_records_core::intake::{IntakeError, IntakeForm};
use patient_records_core::models::{PatientRecord, Sex};
use patient_records_core::stats::{group_by_disease, group_by_registration_year, group_by_sex};
use patient_records_core::vocabulary::DiseaseVocabulary;
use tempfile::TempDir;

fn open_store() -> (TempDir, RecordStore) {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path().join("patientDatabase.db")).unwrap();
    (dir, store)
}

fn make_record(pesel: &str, sex: Sex, disease: &str) -> PatientRecord {
    PatientRecord::new(
        "Jan Kowalski".to_string(),
        pesel.to_string(),
        "25".to_string(),
        sex,
        "D1234".to_string(),
    )
    .with_disease(disease)
    .with_medication("Paracetamol")
}

fn today() -> String {
    chrono::Local::now().date_naive().format(ADD_DATE_FORMAT).to_string()
}

#[test]
fn test_insert_then_find_returns_inserted_values() {
    let (_dir, store) = open_store();

    store
        .insert(&make_record("12345678900", Sex::Male, "Flu"))
        .unwrap();

    let row = store.find_by_key("12345678900").unwrap().unwrap();
    assert_eq!(row.text("full_name"), Some("Jan Kowalski"));
    assert_eq!(row.text("sex"), Some("Male"));
    assert_eq!(row.text("disease"), Some("Flu"));
    assert_eq!(row.text("medication"), Some("Paracetamol"));
    assert_eq!(row.text("doctors_id"), Some("D1234"));
    assert_eq!(row.text("add_date"), Some(today().as_str()));
}

#[test]
fn test_duplicate_pesel_leaves_one_row() {
    let (_dir, store) = open_store();

    store
        .insert(&make_record("12345678900", Sex::Male, "Flu"))
        .unwrap();
    let err = store
        .insert(&make_record("12345678900", Sex::Female, "Asthma"))
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::ConstraintViolation);

    let rows = store.fetch_all().unwrap();
    assert_eq!(rows.len(), 1);
    // The first insert wins
    assert_eq!(rows[0].text("sex"), Some("Male"));
}

#[test]
fn test_fetch_all_counts_inserts() {
    let (_dir, store) = open_store();

    for n in 0..5 {
        assert_eq!(store.fetch_all().unwrap().len(), n);
        store
            .insert(&make_record(&format!("{:011}", n), Sex::Other, ""))
            .unwrap();
    }
    assert_eq!(store.fetch_all().unwrap().len(), 5);
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patientDatabase.db");

    RecordStore::open(&path)
        .unwrap()
        .insert(&make_record("12345678900", Sex::Male, "Flu"))
        .unwrap();

    let reopened = RecordStore::open(&path).unwrap();
    assert!(reopened.find_by_key("12345678900").unwrap().is_some());
}

#[test]
fn test_statistics_over_stored_rows() {
    let (_dir, store) = open_store();

    let patients = [
        ("12345678900", Sex::Male, "Flu"),
        ("12345678901", Sex::Female, "Flu"),
        ("12345678902", Sex::Female, "Asthma"),
        ("12345678903", Sex::Other, ""),
    ];
    for (pesel, sex, disease) in patients {
        store.insert(&make_record(pesel, sex, disease)).unwrap();
    }

    let rows = store.fetch_all().unwrap();

    let years = group_by_registration_year(&rows);
    assert_eq!(years.total(), rows.len());
    assert_eq!(years.len(), 1);
    assert_eq!(years.get(&today()[..4]), 4);

    let sexes = group_by_sex(&rows);
    assert_eq!(sexes.total(), rows.len());
    assert_eq!(sexes.get("Female"), 2);

    let diseases = group_by_disease(&rows);
    assert_eq!(diseases.total(), rows.len());
    assert_eq!(diseases.get("Flu"), 2);
    assert_eq!(diseases.get(""), 1);
}

#[test]
fn test_invalid_pesel_never_reaches_store() {
    let (_dir, store) = open_store();
    let vocabulary = DiseaseVocabulary::from_terms(["Flu"]);

    for pesel in ["1234567890", "123456789012"] {
        let form = IntakeForm {
            doctors_id: "D1234".into(),
            full_name: "Jan Kowalski".into(),
            pesel: pesel.into(),
            age: "25".into(),
            sex: "Male".into(),
            disease: "Flu".into(),
            medication: String::new(),
        };

        match form.validate(&vocabulary) {
            Err(IntakeError::InvalidPesel(len)) => assert_eq!(len, pesel.len()),
            other => panic!("expected InvalidPesel, got {:?}", other),
        }
    }

    assert!(store.fetch_all().unwrap().is_empty());
}
