use super::*;

#[test]
fn credentials_from_input_trims_email() {
    let creds = credentials_from_input("  s@school.org ", "pw").unwrap();
    assert_eq!(creds.email, "s@school.org");
    assert_eq!(creds.password, "pw");
}

#[test]
fn credentials_from_input_keeps_password_whitespace() {
    let creds = credentials_from_input("s@school.org", " pw ").unwrap();
    assert_eq!(creds.password, " pw ");
}

#[test]
fn credentials_from_input_requires_both_fields() {
    assert_eq!(credentials_from_input("   ", "pw"), Err("email is required"));
    assert_eq!(credentials_from_input("s@school.org", ""), Err("password is required"));
}
