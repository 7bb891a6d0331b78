use super::*;

#[test]
fn reset_from_input_trims_email() {
    assert_eq!(reset_from_input("  s@school.org ").unwrap().email, "s@school.org");
}

#[test]
fn reset_from_input_rejects_missing_email() {
    assert_eq!(reset_from_input("  "), Err("email is required"));
}
