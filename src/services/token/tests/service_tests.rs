//! Unit tests for token issuance and verification

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::clock::ManualClock;
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service_with_clock() -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::start_now());
    let service = TokenService::new(TokenServiceConfig::default(), clock.clone());
    (service, clock)
}

/// Flips one character inside the signature segment without leaving the
/// base64url alphabet
fn tamper(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    let idx = chars.len() - 5;
    chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[test]
fn test_issue_then_verify_succeeds() {
    let (service, _clock) = service_with_clock();
    let user_id = Uuid::new_v4();

    let token = service
        .issue(user_id, "a@x.com", UserRole::User, Duration::minutes(15))
        .unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, "user");
}

#[test]
fn test_verify_fails_once_ttl_elapses() {
    let (service, clock) = service_with_clock();

    let token = service
        .issue(Uuid::new_v4(), "a@x.com", UserRole::User, Duration::minutes(15))
        .unwrap();

    clock.advance(Duration::minutes(14));
    assert!(service.verify(&token).is_ok());

    clock.advance(Duration::minutes(1));
    match service.verify(&token) {
        Err(DomainError::Token(TokenError::TokenExpired)) => {}
        other => panic!("expected TokenExpired, got {:?}", other.err()),
    }
}

#[test]
fn test_tampered_token_is_invalid_never_a_crash() {
    let (service, _clock) = service_with_clock();

    let token = service
        .issue(Uuid::new_v4(), "a@x.com", UserRole::User, Duration::minutes(15))
        .unwrap();
    let tampered = tamper(&token);

    match service.verify(&tampered) {
        Err(DomainError::Token(TokenError::TokenInvalid)) => {}
        other => panic!("expected TokenInvalid, got {:?}", other.err()),
    }
}

#[test]
fn test_garbage_token_is_malformed() {
    let (service, _clock) = service_with_clock();

    match service.verify("not-a-jwt") {
        Err(DomainError::Token(TokenError::TokenMalformed)) => {}
        other => panic!("expected TokenMalformed, got {:?}", other.err()),
    }
}

#[test]
fn test_token_signed_with_other_key_is_invalid() {
    let (service, _clock) = service_with_clock();
    let other = TokenService::new(
        TokenServiceConfig {
            jwt_secret: "a-different-signing-secret".to_string(),
            ..TokenServiceConfig::default()
        },
        Arc::new(ManualClock::start_now()),
    );

    let token = other
        .issue(Uuid::new_v4(), "a@x.com", UserRole::User, Duration::minutes(15))
        .unwrap();

    match service.verify(&token) {
        Err(DomainError::Token(TokenError::TokenInvalid)) => {}
        other => panic!("expected TokenInvalid, got {:?}", other.err()),
    }
}

#[test]
fn test_issue_pair_same_claims_different_ttls() {
    let (service, _clock) = service_with_clock();
    let user_id = Uuid::new_v4();

    let pair = service
        .issue_pair(user_id, "a@x.com", UserRole::Moderator)
        .unwrap();

    let access = service.verify(&pair.access_token).unwrap();
    let refresh = service.verify(&pair.refresh_token).unwrap();

    assert_eq!(access.sub, refresh.sub);
    assert_eq!(access.email, refresh.email);
    assert_eq!(access.role, refresh.role);
    assert_eq!(access.role, "moderator");
    assert!(refresh.exp > access.exp);
    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);
}

#[test]
fn test_refresh_token_outlives_access_token() {
    let (service, clock) = service_with_clock();

    let pair = service
        .issue_pair(Uuid::new_v4(), "a@x.com", UserRole::User)
        .unwrap();

    clock.advance(Duration::hours(1));
    assert!(matches!(
        service.verify(&pair.access_token),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
    assert!(service.verify(&pair.refresh_token).is_ok());
}

#[test]
fn test_decode_unverified_reads_tampered_payload() {
    let (service, clock) = service_with_clock();
    let user_id = Uuid::new_v4();

    let token = service
        .issue(user_id, "a@x.com", UserRole::User, Duration::minutes(15))
        .unwrap();

    // Signature and expiry are ignored by the structural decode
    clock.advance(Duration::days(365));
    let claims = service.decode_unverified(&tamper(&token)).unwrap();
    assert_eq!(claims.sub, user_id.to_string());

    assert!(service.decode_unverified("definitely-not-a-jwt").is_none());
}
