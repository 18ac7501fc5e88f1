use crate::application::{derive_id, ApplicationInput, Status};

fn input(name: &str, company: &str, position: &str) -> ApplicationInput {
    ApplicationInput {
        name: name.into(),
        company: company.into(),
        position: position.into(),
        status: Status::Pending,
    }
}

#[test]
fn id_is_derived_after_normalization() {
    let a = input("  jane DOE ", "Acme Corp", " Data Engineer").validate().unwrap();
    let b = input("Jane Doe", "  Acme Corp ", "Data Engineer").validate().unwrap();
    assert_eq!(a.id, "jane_doe_acme_corp_data_engineer");
    assert_eq!(a.id, b.id);
    assert_eq!(a.name, "Jane Doe");
    assert_eq!(a.company, "Acme Corp");
}

#[test]
fn derive_id_lowercases_and_underscores() {
    assert_eq!(derive_id("Jo Li", "ACME", "Dev Ops"), "jo_li_acme_dev_ops");
}

#[test]
fn empty_fields_are_rejected() {
    for (bad, field) in [
        (input(" ", "Acme", "Dev"), "name"),
        (input("Jo", "", "Dev"), "company"),
        (input("Jo", "Acme", "\n"), "position"),
    ] {
        let err = bad.validate().unwrap_err();
        assert_eq!(err.field(), field);
    }
}

#[test]
fn validation_is_idempotent() {
    let once = input("mary ann", "Globex", "QA").validate().unwrap();
    let twice = ApplicationInput::from(once.clone()).validate().unwrap();
    assert_eq!(once, twice);
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("Interview".parse::<Status>().unwrap(), Status::Interview);
    assert_eq!(" WITHDRAWN ".parse::<Status>().unwrap(), Status::Withdrawn);
    assert!("hired".parse::<Status>().is_err());
}

#[test]
fn status_serializes_lowercase() {
    let json = serde_json::to_string(&Status::Accepted).unwrap();
    assert_eq!(json, "\"accepted\"");
    let back: Status = serde_json::from_str("\"rejected\"").unwrap();
    assert_eq!(back, Status::Rejected);
}
