use biblio_core::{Material, MaterialKind, MaterialStatus, MaterialValidationError, CODE_LENGTH};

const DAY_MS: i64 = 86_400_000;

fn physical(copy_number: i64) -> MaterialKind {
    MaterialKind::physical(copy_number).unwrap()
}

#[test]
fn new_material_starts_available_with_generated_code() {
    let material = Material::new(physical(1), "Clean Code", "R. Martin").unwrap();

    assert_eq!(material.code.chars().count(), CODE_LENGTH);
    assert!(material
        .code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert!(!material.is_loaned);
    assert_eq!(material.loan_date, None);
    assert_eq!(material.due_date, None);
    assert_eq!(material.status(), MaterialStatus::Available);
    material.validate().unwrap();
}

#[test]
fn loan_periods_are_fixed_per_kind() {
    let book = Material::new(physical(2), "Title", "Author").unwrap();
    let ebook = Material::new(
        MaterialKind::digital(1.5).unwrap(),
        "Title",
        "Author",
    )
    .unwrap();

    assert_eq!(book.loan_period_days(), 7);
    assert_eq!(ebook.loan_period_days(), 3);
}

#[test]
fn loan_sets_both_dates_from_loan_period() {
    let mut material = Material::new(physical(1), "Title", "Author").unwrap();

    assert!(material.loan_at(1_700_000_000_000));
    assert!(material.is_loaned);
    assert_eq!(material.loan_date, Some(1_700_000_000_000));
    assert_eq!(material.due_date, Some(1_700_000_000_000 + 7 * DAY_MS));
    material.validate().unwrap();
}

#[test]
fn second_loan_fails_and_leaves_state_unchanged() {
    let mut material = Material::new(physical(1), "Title", "Author").unwrap();
    assert!(material.loan_at(1_700_000_000_000));
    let snapshot = material.clone();

    assert!(!material.loan_at(1_700_000_500_000));
    assert_eq!(material, snapshot);
}

#[test]
fn loan_then_return_restores_available_state() {
    let mut material = Material::new(physical(1), "Title", "Author").unwrap();

    assert!(material.loan_at(1_700_000_000_000));
    assert!(material.return_material());

    assert!(!material.is_loaned);
    assert_eq!(material.loan_date, None);
    assert_eq!(material.due_date, None);
    assert_eq!(material.status(), MaterialStatus::Available);
}

#[test]
fn return_on_never_loaned_material_fails_without_change() {
    let mut material = Material::new(physical(1), "Title", "Author").unwrap();
    let snapshot = material.clone();

    assert!(!material.return_material());
    assert_eq!(material, snapshot);
}

#[test]
fn set_title_trims_and_rejects_empty() {
    let mut material = Material::new(physical(1), "Draft", "Author").unwrap();

    material.set_title("  The Pragmatic Programmer  ").unwrap();
    assert_eq!(material.title, "The Pragmatic Programmer");

    let err = material.set_title("   ").unwrap_err();
    assert_eq!(err, MaterialValidationError::EmptyTitle);
    assert_eq!(material.title, "The Pragmatic Programmer");
}

#[test]
fn set_author_trims_and_rejects_empty() {
    let mut material = Material::new(physical(1), "Title", "Draft").unwrap();

    material.set_author(" A. Hunt ").unwrap();
    assert_eq!(material.author, "A. Hunt");

    let err = material.set_author("").unwrap_err();
    assert_eq!(err, MaterialValidationError::EmptyAuthor);
    assert_eq!(material.author, "A. Hunt");
}

#[test]
fn constructors_reject_empty_title_and_author() {
    let err = Material::new(physical(1), "  ", "Author").unwrap_err();
    assert_eq!(err, MaterialValidationError::EmptyTitle);

    let err = Material::new(physical(1), "Title", "\t").unwrap_err();
    assert_eq!(err, MaterialValidationError::EmptyAuthor);
}

#[test]
fn physical_kind_rejects_non_positive_copy_numbers() {
    assert_eq!(
        MaterialKind::physical(0).unwrap_err(),
        MaterialValidationError::InvalidCopyNumber(0)
    );
    assert_eq!(
        MaterialKind::physical(-3).unwrap_err(),
        MaterialValidationError::InvalidCopyNumber(-3)
    );
    assert!(MaterialKind::physical(i64::from(u32::MAX) + 1).is_err());
}

#[test]
fn digital_kind_rejects_non_positive_and_non_finite_sizes() {
    assert_eq!(
        MaterialKind::digital(-5.0).unwrap_err(),
        MaterialValidationError::InvalidFileSize(-5.0)
    );
    assert_eq!(
        MaterialKind::digital(0.0).unwrap_err(),
        MaterialValidationError::InvalidFileSize(0.0)
    );
    assert!(MaterialKind::digital(f64::NAN).is_err());
    assert!(MaterialKind::digital(f64::INFINITY).is_err());
}

#[test]
fn with_code_rejects_malformed_codes() {
    for bad in ["", "ABC", "abcdefgh", "ABCDEFG!", "ABCDEFGH9"] {
        let err = Material::with_code(bad, physical(1), "Title", "Author").unwrap_err();
        assert_eq!(err, MaterialValidationError::InvalidCode(bad.to_string()));
    }
}

#[test]
fn validate_rejects_loan_flag_and_date_mismatch() {
    let mut material = Material::with_code("AB12CD34", physical(1), "Title", "Author").unwrap();

    material.is_loaned = true;
    assert_eq!(
        material.validate().unwrap_err(),
        MaterialValidationError::InconsistentLoanState { is_loaned: true }
    );

    material.is_loaned = false;
    material.loan_date = Some(1_700_000_000_000);
    material.due_date = Some(1_700_000_000_000 + 7 * DAY_MS);
    assert_eq!(
        material.validate().unwrap_err(),
        MaterialValidationError::InconsistentLoanState { is_loaned: false }
    );
}

#[test]
fn material_serialization_uses_expected_wire_fields() {
    let mut material =
        Material::with_code("AB12CD34", physical(3), "Clean Code", "R. Martin").unwrap();
    material.loan_at(1_700_000_000_000);

    let json = serde_json::to_value(&material).unwrap();
    assert_eq!(json["title"], "Clean Code");
    assert_eq!(json["author"], "R. Martin");
    assert_eq!(json["code"], "AB12CD34");
    assert_eq!(json["is_loaned"], true);
    assert_eq!(json["loan_date"], 1_700_000_000_000_i64);
    assert_eq!(json["due_date"], 1_700_000_000_000_i64 + 7 * DAY_MS);
    assert_eq!(json["type"], "physical_book");
    assert_eq!(json["copy_number"], 3);

    let decoded: Material = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, material);
}

#[test]
fn digital_serialization_carries_file_size() {
    let material = Material::with_code(
        "ZZ99YY88",
        MaterialKind::digital(2.5).unwrap(),
        "Title",
        "Author",
    )
    .unwrap();

    let json = serde_json::to_value(&material).unwrap();
    assert_eq!(json["type"], "digital_book");
    assert_eq!(json["file_size_mb"], 2.5);
}

#[test]
fn specific_info_describes_the_kind_field() {
    let book = Material::new(physical(3), "Title", "Author").unwrap();
    let ebook = Material::new(MaterialKind::digital(2.5).unwrap(), "Title", "Author").unwrap();

    assert_eq!(book.specific_info(), "Copy number: 3");
    assert_eq!(ebook.specific_info(), "File size: 2.5 MB");
}
