use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub is_admin: bool,
    pub exp: usize,
    pub iat: usize,
}

pub fn sign_token(user_id: i64, email: &str, is_admin: bool, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::hours(8);
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        is_admin,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256)
    )
    .map(|d| d.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trips_claims() {
        let token = sign_token(42, "lies@juweeltjes.be", true, "test-secret").unwrap();
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "lies@juweeltjes.be");
        assert!(claims.is_admin);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = sign_token(1, "a@b.c", false, "right-secret").unwrap();
        assert!(verify_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(verify_token("not.a.token", "secret").is_err());
    }
}
