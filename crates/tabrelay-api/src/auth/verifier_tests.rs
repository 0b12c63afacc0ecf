use super::*;

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

fn token_with(claims: Value, secret: &[u8]) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
}

fn expires_in(seconds: i64) -> i64 {
    chrono::Utc::now().timestamp() + seconds
}

#[tokio::test]
async fn test_jwt_username_claim() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    let token = token_with(json!({ "username": "alice", "exp": expires_in(600) }), SECRET);

    let user = verifier.verify(&token).await.unwrap();
    assert_eq!(user, UserId::from("alice"));
}

#[tokio::test]
async fn test_jwt_falls_back_to_sub() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    let token = token_with(json!({ "sub": "bob", "exp": expires_in(600) }), SECRET);

    let user = verifier.verify(&token).await.unwrap();
    assert_eq!(user, UserId::from("bob"));
}

#[tokio::test]
async fn test_jwt_custom_claim() {
    let verifier = JwtVerifier::hs256(SECRET, "email");
    let token = token_with(
        json!({ "email": "carol@example.com", "sub": "ignored", "exp": expires_in(600) }),
        SECRET,
    );

    let user = verifier.verify(&token).await.unwrap();
    assert_eq!(user.as_str(), "carol@example.com");
}

#[tokio::test]
async fn test_jwt_missing_identity_claim() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    let token = token_with(json!({ "exp": expires_in(600) }), SECRET);

    let result = verifier.verify(&token).await;
    assert!(matches!(result, Err(AuthError::MissingClaim(claim)) if claim == "username"));
}

#[tokio::test]
async fn test_jwt_empty_identity_rejected() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    let token = token_with(json!({ "username": "", "exp": expires_in(600) }), SECRET);

    assert!(verifier.verify(&token).await.is_err());
}

#[tokio::test]
async fn test_jwt_wrong_secret() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    let token = token_with(
        json!({ "username": "alice", "exp": expires_in(600) }),
        b"another-secret-another-secret-xx",
    );

    let result = verifier.verify(&token).await;
    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[tokio::test]
async fn test_jwt_expired() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    let token = token_with(json!({ "username": "alice", "exp": expires_in(-3600) }), SECRET);

    let result = verifier.verify(&token).await;
    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[tokio::test]
async fn test_jwt_garbage_token() {
    let verifier = JwtVerifier::hs256(SECRET, "username");
    assert!(verifier.verify("not-a-jwt").await.is_err());
}

#[tokio::test]
async fn test_static_verifier() {
    let verifier = StaticTokenVerifier::new()
        .with_token("tok-a", "alice")
        .with_token("tok-b", "bob");

    assert_eq!(verifier.len(), 2);
    assert_eq!(verifier.verify("tok-a").await.unwrap(), UserId::from("alice"));
    assert!(matches!(
        verifier.verify("tok-c").await,
        Err(AuthError::UnknownToken)
    ));
}

#[test]
fn test_verifier_from_config_jwt_requires_secret() {
    let config = AuthConfig::default();
    let result = verifier_from_config(&config);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[tokio::test]
async fn test_verifier_from_config_jwt() {
    let config = AuthConfig {
        jwt_secret: Some(String::from_utf8(SECRET.to_vec()).unwrap()),
        ..Default::default()
    };
    let verifier = verifier_from_config(&config).unwrap();
    let token = token_with(json!({ "username": "alice", "exp": expires_in(600) }), SECRET);

    assert_eq!(verifier.verify(&token).await.unwrap(), UserId::from("alice"));
}

#[tokio::test]
async fn test_verifier_from_config_static() {
    let mut config = AuthConfig {
        mode: AuthMode::Static,
        ..Default::default()
    };
    assert!(verifier_from_config(&config).is_err());

    config
        .static_tokens
        .insert("dev-token".to_string(), "alice".to_string());
    let verifier = verifier_from_config(&config).unwrap();
    assert_eq!(verifier.verify("dev-token").await.unwrap(), UserId::from("alice"));
}
