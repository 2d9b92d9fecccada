use chrono::NaiveDate;
use shelf_core::{Library, LoanRecord, RegistrationRecord, StoreConfig, StoreError};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn loan_table_layout_matches_fixed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    let library = Library::open(&config);

    library
        .loans()
        .issue("100", "Algebra, Vol. 1", "Alice", day(2024, 1, 10))
        .unwrap();
    library
        .loans()
        .issue("101", "Geometry", "Bob", day(2024, 1, 11))
        .unwrap();
    library.loans().return_book("100", day(2024, 2, 1)).unwrap();

    let bytes = std::fs::read(config.loan_path()).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    assert_eq!(
        String::from_utf8(bytes[3..].to_vec()).unwrap(),
        "BookID,Title,IssuedTo,IssueDate,ReturnDate\n\
         100,\"Algebra, Vol. 1\",Alice,2024-01-10,2024-02-01\n\
         101,Geometry,Bob,2024-01-11,\n"
    );
}

#[test]
fn save_of_load_is_byte_identical_for_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    let library = Library::open(&config);

    library
        .loans()
        .issue("007", "Spy \"Novel\"", "Alice", day(2024, 1, 10))
        .unwrap();
    library
        .loans()
        .issue("B2", "Notes\nwith newline", "Bob", day(2024, 1, 12))
        .unwrap();
    library.loans().return_book("007", day(2024, 1, 20)).unwrap();
    library
        .registrations()
        .register(
            &RegistrationRecord::new("Asha Rao", "5B", day(2013, 4, 2))
                .with_address("Flat 3, Hill Road"),
        )
        .unwrap();

    let loans_before = std::fs::read(config.loan_path()).unwrap();
    let registrations_before = std::fs::read(config.registration_path()).unwrap();

    let loans = library.loans().load().unwrap();
    library.loans().save(&loans).unwrap();
    let registrations = library.registrations().load().unwrap();
    library.registrations().save(&registrations).unwrap();

    assert_eq!(std::fs::read(config.loan_path()).unwrap(), loans_before);
    assert_eq!(
        std::fs::read(config.registration_path()).unwrap(),
        registrations_before
    );
    assert_eq!(loans[0].book_id, "007");
}

#[test]
fn timestamps_written_by_other_tools_read_as_dates() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    std::fs::write(
        config.loan_path(),
        "BookID,Title,IssuedTo,IssueDate,ReturnDate\n\
         12,Atlas,Chen,2024-01-10 00:00:00,\n\
         13,Poems,Dana,2024-01-11,2024-01-15 00:00:00\n",
    )
    .unwrap();
    let library = Library::open(&config);

    assert_eq!(
        library.load_loans(),
        vec![
            LoanRecord::issued("12", "Atlas", "Chen", day(2024, 1, 10)),
            LoanRecord {
                return_date: Some(day(2024, 1, 15)),
                ..LoanRecord::issued("13", "Poems", "Dana", day(2024, 1, 11))
            },
        ]
    );

    library.loans().return_book("12", day(2024, 2, 1)).unwrap();
    let rewritten = std::fs::read_to_string(config.loan_path()).unwrap();
    assert!(rewritten.contains("12,Atlas,Chen,2024-01-10,2024-02-01\n"));
    assert!(rewritten.contains("13,Poems,Dana,2024-01-11,2024-01-15\n"));
}

#[test]
fn malformed_table_is_reported_and_left_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path());
    let garbage = "BookID,Title,IssuedTo,IssueDate,ReturnDate\n1,T,U,not-a-date,\n";
    std::fs::write(config.loan_path(), garbage).unwrap();
    let library = Library::open(&config);

    assert!(library.loans().load().unwrap().is_empty());
    let err = library
        .loans()
        .issue("2", "T", "U", day(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::Unreadable { .. }));
    assert!(!err.is_domain());
    assert_eq!(std::fs::read_to_string(config.loan_path()).unwrap(), garbage);
}

#[cfg(unix)]
#[test]
fn write_failure_is_propagated_to_the_caller() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users bypass directory permissions.
    if tempfile::NamedTempFile::new_in(&locked).is_ok() {
        return;
    }

    let library = Library::open(&StoreConfig::new(&locked));
    let err = library
        .loans()
        .issue("1", "T", "U", day(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!library.issue("1", "T", "U", day(2024, 1, 1)));

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
}
