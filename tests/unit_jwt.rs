use rollcall::config::jwt::JwtConfig;
use rollcall::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_access_token(
        user_id,
        "test@example.com",
        Some(Uuid::new_v4()),
        "teacher",
        &jwt_config,
    );

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();
    let email = "test@example.com";

    let token =
        create_access_token(user_id, email, Some(school_id), "teacher", &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.email, email);
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.school_id, Some(school_id));
    assert_eq!(claims.role, "teacher");
}

#[test]
fn test_token_without_school_scope() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        Uuid::new_v4(),
        "sysadmin@example.com",
        None,
        "admin",
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.school_id, None);
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("invalid.token.here", &jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        Uuid::new_v4(),
        "test@example.com",
        Some(Uuid::new_v4()),
        "teacher",
        &jwt_config,
    )
    .unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    let result = verify_token(&token, &wrong_jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_empty() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("", &jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();

    let token = create_access_token(
        Uuid::new_v4(),
        "test@example.com",
        Some(Uuid::new_v4()),
        "teacher",
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "not.enough.parts",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        let result = verify_token(token, &jwt_config);
        assert!(result.is_err());
    }
}

#[test]
fn test_create_token_different_users_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let user_id1 = Uuid::new_v4();
    let user_id2 = Uuid::new_v4();
    let school_id = Uuid::new_v4();

    let token1 = create_access_token(
        user_id1,
        "user1@example.com",
        Some(school_id),
        "teacher",
        &jwt_config,
    )
    .unwrap();
    let token2 = create_access_token(
        user_id2,
        "user2@example.com",
        Some(school_id),
        "teacher",
        &jwt_config,
    )
    .unwrap();

    assert_ne!(token1, token2);

    let claims1 = verify_token(&token1, &jwt_config).unwrap();
    let claims2 = verify_token(&token2, &jwt_config).unwrap();

    assert_eq!(claims1.sub, user_id1.to_string());
    assert_eq!(claims2.sub, user_id2.to_string());
}
