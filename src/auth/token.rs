use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api_error::{ApiError, ApiResult};
use crate::data::UserId;

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub id: UserId,
    pub exp: i64,
}

pub fn issue(user_id: UserId, secret: &str, expires_in: Duration) -> ApiResult<String> {
    let claims = Claims {
        id: user_id,
        exp: (Utc::now() + expires_in).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
}

pub fn verify(token: &str, secret: &str) -> ApiResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_user_id() {
        let token = issue(42, "secret", Duration::hours(3)).unwrap();
        let claims = verify(&token, "secret").unwrap();
        assert_eq!(claims.id, 42);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue(42, "secret", Duration::hours(-4)).unwrap();
        assert!(verify(&token, "secret").is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(42, "secret", Duration::hours(3)).unwrap();
        assert!(verify(&token, "other-secret").is_err());
    }
}
