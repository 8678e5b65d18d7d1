use storefront_backend::util::signature::*;

const SECRET: &str = "test_gateway_key_secret";

#[test]
fn test_sign_and_verify_roundtrip() {
    let order_id = "66b1f77bcf86cd7994390abc";
    let payment_id = "pay_Abc123XyZ";

    let signature = sign_payment(SECRET, order_id, payment_id).unwrap();
    assert!(!signature.is_empty());

    assert!(verify_payment_signature(SECRET, order_id, payment_id, &signature).is_ok());
}

#[test]
fn test_signature_is_hex_encoded() {
    let signature = sign_payment(SECRET, "order", "payment").unwrap();

    // HMAC-SHA256 digest is 32 bytes, 64 hex chars
    assert_eq!(signature.len(), 64);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_verify_rejects_tampered_payment_id() {
    let signature = sign_payment(SECRET, "order1", "payment1").unwrap();

    let result = verify_payment_signature(SECRET, "order1", "payment2", &signature);
    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

#[test]
fn test_verify_rejects_tampered_order_id() {
    let signature = sign_payment(SECRET, "order1", "payment1").unwrap();

    let result = verify_payment_signature(SECRET, "order2", "payment1", &signature);
    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let signature = sign_payment(SECRET, "order1", "payment1").unwrap();

    let result = verify_payment_signature("other_secret", "order1", "payment1", &signature);
    assert!(matches!(result, Err(SignatureError::Mismatch)));
}

#[test]
fn test_verify_rejects_non_hex_signature() {
    let result = verify_payment_signature(SECRET, "order1", "payment1", "zzzz-not-hex");
    assert!(matches!(result, Err(SignatureError::InvalidEncoding)));
}

#[test]
fn test_field_boundary_not_malleable() {
    // "ab" + "c" and "a" + "bc" must not produce the same MAC input
    let first = sign_payment(SECRET, "ab", "c").unwrap();
    let second = sign_payment(SECRET, "a", "bc").unwrap();
    assert_ne!(first, second);
}
