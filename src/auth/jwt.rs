use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::auth::middleware::Claims;

/// Generate a fresh 256-bit JWT signing key. The store is memory-only, so
/// the key is regenerated on every boot and outstanding tokens die with it.
pub fn generate_jwt_secret() -> Vec<u8> {
    let key: [u8; 32] = rand::rng().random();
    key.to_vec()
}

/// Issue an access token. Claims: sub=username, iat, exp.
pub fn issue_access_token(
    secret: &[u8],
    username: &str,
    ttl_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: username.to_string(),
        iat: now,
        exp: now + ttl_minutes * 60,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// Validate an access token and return its claims. Expiry, signature, and
/// structure are all checked; any failure maps to the same error type.
pub fn validate_access_token(
    secret: &[u8],
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(token_data.claims)
}
