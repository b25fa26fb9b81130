use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    /// Display name (the user's given name).
    pub name: String,
    /// Role id.
    pub role: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, name: String, role: i32, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            name,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn decodes_what_it_encodes() {
        let claims = Claims::new(1001, "Ana".to_string(), 2, Duration::hours(24));
        let token = encode_token(&claims, SECRET).unwrap();
        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, 1001);
        assert_eq!(decoded.name, "Ana");
        assert_eq!(decoded.role, 2);
        assert_eq!(decoded.exp - decoded.iat, 24 * 60 * 60);
    }

    #[test]
    fn rejects_a_foreign_secret() {
        let claims = Claims::new(1, "Ana".to_string(), 1, Duration::hours(1));
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_an_expired_token() {
        // Past the default 60s leeway.
        let claims = Claims::new(1, "Ana".to_string(), 1, Duration::hours(-1));
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_token("not.a.token", SECRET).is_err());
    }
}
