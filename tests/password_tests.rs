use storefront_backend::util::password::*;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$argon2"));
}

#[test]
fn test_hash_password_different_salts() {
    let password = "same_password";
    let first = PasswordUtilsImpl::hash_password(password).unwrap();
    let second = PasswordUtilsImpl::hash_password(password).unwrap();

    // Random salts mean two hashes of the same password never match
    assert_ne!(first, second);
}

#[test]
fn test_verify_password_correct() {
    let password = "correct_horse_battery_staple";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = PasswordUtilsImpl::hash_password("right_password").unwrap();

    assert!(!PasswordUtilsImpl::verify_password("wrong_password", &hash).unwrap());
}

#[test]
fn test_verify_password_empty_against_hash() {
    let hash = PasswordUtilsImpl::hash_password("nonempty").unwrap();

    assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_password_empty_stored_hash_is_invalid_format() {
    // OAuth-only accounts store an empty hash; callers must treat that as
    // "no password set", not attempt verification
    let result = PasswordUtilsImpl::verify_password("anything", "");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_verify_password_invalid_hash_format() {
    let result = PasswordUtilsImpl::verify_password("password", "not-a-valid-hash");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_hash_password_unicode() {
    let password = "Pässw0rd123!🔒";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("Passw0rd123!", &hash).unwrap());
}

#[test]
fn test_hash_password_very_long() {
    let password = "a".repeat(1000);
    let hash = PasswordUtilsImpl::hash_password(&password).unwrap();

    assert!(PasswordUtilsImpl::verify_password(&password, &hash).unwrap());
}
