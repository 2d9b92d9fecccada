use chrono::NaiveDate;
use shelf_core::{
    CsvRegistrationRepository, RegistrationRecord, RegistrationRepository, RegistrationService,
    StoreConfig,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn register_appends_in_submission_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    let service = RegistrationService::new(CsvRegistrationRepository::from_config(&config));

    let first = RegistrationRecord::new("Asha Rao", "5B", day(2013, 4, 2))
        .with_address("12 Hill Road")
        .with_phone_number("0123456789")
        .with_email("asha@example.org");
    let second = RegistrationRecord::new("Ben Ode", "6A", day(2012, 11, 30));

    service.register(&first).unwrap();
    service.register(&second).unwrap();

    assert_eq!(service.load().unwrap(), vec![first, second]);
    assert!(config.registration_path().is_file());
}

#[test]
fn identical_registrations_are_stored_twice() {
    let dir = tempfile::tempdir().unwrap();
    let service = RegistrationService::new(CsvRegistrationRepository::new(
        dir.path().join("registration_newuser.csv"),
    ));
    let record = RegistrationRecord::new("Asha Rao", "5B", day(2013, 4, 2));

    service.register(&record).unwrap();
    service.register(&record).unwrap();

    let stored = service.load().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], stored[1]);
}

#[test]
fn optional_fields_persist_as_empty_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registration_newuser.csv");
    let repo = CsvRegistrationRepository::new(&path);

    let registration = RegistrationRecord::new("Asha Rao", "5B", day(2013, 4, 2)).with_email("");
    repo.append_registration(&registration).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.trim_start_matches('\u{feff}'),
        "FullName,Class,DateOfBirth,Address,PhoneNumber,Email\nAsha Rao,5B,2013-04-02,,,\n"
    );
    let loaded = repo.load_registrations().unwrap();
    assert_eq!(loaded[0].email, None);
}

#[test]
fn load_of_missing_table_creates_it_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registration_newuser.csv");
    let service = RegistrationService::new(CsvRegistrationRepository::new(&path));

    assert!(service.load().unwrap().is_empty());
    assert!(path.is_file());
}
