use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: String,
    pub exp: usize,
}

pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| e.to_string())?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, String> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| e.to_string())?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn get_jwt_secret() -> Result<String, String> {
    match env::var("JWT_SECRET") {
        Ok(secret) => Ok(secret),
        Err(_) if cfg!(debug_assertions) => Ok("secret".to_string()),
        Err(_) => Err("JWT_SECRET environment variable must be set in production".to_string()),
    }
}

fn token_ttl_hours() -> i64 {
    env::var("JWT_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|h: &i64| *h > 0)
        .unwrap_or(24)
}

pub fn create_jwt(user_id: i32, role: &str) -> Result<String, String> {
    let secret = get_jwt_secret()?;
    let expiration = (Utc::now() + Duration::hours(token_ttl_hours())).timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_owned(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

pub fn decode_jwt(token: &str) -> Result<Claims, String> {
    let secret = get_jwt_secret()?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("lecture").unwrap();
        assert_ne!(hash, "lecture");
        assert!(verify_password("lecture", &hash).unwrap());
        assert!(!verify_password("ecoute", &hash).unwrap());
    }

    #[test]
    fn jwt_carries_user_id_and_role() {
        let token = create_jwt(7, "staff").unwrap();
        let claims = decode_jwt(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, "staff");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = create_jwt(7, "staff").unwrap();
        assert!(decode_jwt(&format!("{}x", token)).is_err());
    }
}
