// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT compatibility tests.
//!
//! Tokens come from the identity provider, so the claim layout is a contract.
//! These tests pin it from both directions.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use missao_natal::middleware::auth::{create_jwt, Claims, Role};
use serde::Serialize;

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    let token = create_jwt("64f1c0ffee", "Ana", Role::Admin, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "64f1c0ffee");
    assert_eq!(token_data.claims.name, "Ana");
    assert_eq!(token_data.claims.role, Role::Admin);
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_minimal_provider_token_defaults_to_participant() {
    // A provider token that only carries the standard claims
    #[derive(Serialize)]
    struct MinimalClaims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let token = encode(
        &Header::new(Algorithm::HS256),
        &MinimalClaims {
            sub: "u42".to_string(),
            exp: now + 3600,
            iat: now,
        },
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(SIGNING_KEY),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();

    assert_eq!(token_data.claims.role, Role::Participant);
    assert_eq!(token_data.claims.name, "");
}

#[test]
fn test_jwt_expiration_is_future() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt("u1", "Ana", Role::Participant, SIGNING_KEY).unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data =
        decode::<Claims>(&token, &DecodingKey::from_secret(SIGNING_KEY), &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    assert!(
        token_data.claims.exp > now + 86400 * 29,
        "Token expiration should be ~30 days in the future"
    );
}
