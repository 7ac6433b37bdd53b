use super::*;

#[test]
fn password_strength_policy() {
    assert!(validate_password_strength("abc123xy").is_ok());
    assert!(validate_password_strength("").is_err());
    assert!(validate_password_strength("short1").is_err());
    assert!(validate_password_strength("lettersonly").is_err());
    assert!(validate_password_strength("12345678").is_err());
}

#[test]
fn password_length_counts_characters_not_bytes() {
    // Multibyte characters still need eight of them plus letter+digit.
    assert!(validate_password_strength("pass12é8").is_ok());
}
