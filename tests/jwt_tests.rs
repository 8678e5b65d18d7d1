use storefront_backend::config::JwtConfig;
use storefront_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::from_test_env())
}

struct TestUser {
    id: String,
    email: String,
    role: String,
}

impl TestUser {
    fn customer() -> Self {
        Self {
            id: "507f1f77bcf86cd799439011".to_string(),
            email: "customer@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    fn admin() -> Self {
        Self {
            id: "507f1f77bcf86cd799439012".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }
}

#[test]
fn test_token_type_as_str() {
    assert_eq!(TokenType::Access.as_str(), "access");
    assert_eq!(TokenType::Refresh.as_str(), "refresh");
}

#[test]
fn test_generate_access_token_roundtrip() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::customer();

    let token = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "access");
}

#[test]
fn test_generate_refresh_token_roundtrip() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::admin();

    let token = jwt_utils
        .generate_refresh_token(&user.id, &user.email, &user.role)
        .unwrap();

    let claims = jwt_utils.validate_refresh_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.token_type, "refresh");
}

#[test]
fn test_generate_token_pair() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::customer();

    let pair = jwt_utils
        .generate_token_pair(&user.id, &user.email, &user.role)
        .unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(pair.expires_in, jwt_utils.jwt_config.access_token_expiration * 60);
    assert_eq!(pair.token_type, "Bearer");

    assert!(jwt_utils.validate_access_token(&pair.access_token).is_ok());
    assert!(jwt_utils.validate_refresh_token(&pair.refresh_token).is_ok());
}

#[test]
fn test_access_token_rejected_as_refresh() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::customer();

    let token = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();

    let result = jwt_utils.validate_refresh_token(&token);
    assert!(matches!(result, Err(JwtError::InvalidTokenType { .. })));
}

#[test]
fn test_refresh_token_rejected_as_access() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::customer();

    let token = jwt_utils
        .generate_refresh_token(&user.id, &user.email, &user.role)
        .unwrap();

    assert!(jwt_utils.validate_access_token(&token).is_err());
}

#[test]
fn test_validate_garbage_token() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.validate_access_token("not-a-jwt").is_err());
    assert!(jwt_utils.validate_access_token("").is_err());
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let jwt_utils = create_test_jwt_utils();
    let mut other_config = JwtConfig::from_test_env();
    other_config.jwt_secret = "another-secret-key-with-enough-length-987654".to_string();
    let other_utils = JwtTokenUtilsImpl::new(other_config);

    let token = other_utils
        .generate_access_token("user123", "user@example.com", "user")
        .unwrap();

    assert!(jwt_utils.validate_access_token(&token).is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = create_test_jwt_utils();

    let token = jwt_utils
        .extract_token_from_header("Bearer abc.def.ghi")
        .unwrap();
    assert_eq!(token, "abc.def.ghi");
}

#[test]
fn test_extract_token_from_header_invalid() {
    let jwt_utils = create_test_jwt_utils();

    assert!(jwt_utils.extract_token_from_header("abc.def.ghi").is_err());
    assert!(jwt_utils.extract_token_from_header("Basic abc").is_err());
    assert!(jwt_utils.extract_token_from_header("Bearer ").is_err());
    assert!(jwt_utils.extract_token_from_header("").is_err());
}

#[test]
fn test_tokens_have_unique_jti() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::customer();

    let first = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();
    let second = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();

    let first_claims = jwt_utils.validate_access_token(&first).unwrap();
    let second_claims = jwt_utils.validate_access_token(&second).unwrap();
    assert_ne!(first_claims.jti, second_claims.jti);
}
