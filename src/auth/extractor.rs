use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::jwt::{self, Claims};
use crate::auth::ACCESS_TOKEN_COOKIE;
use crate::error::AppError;
use crate::state::SharedState;

/// Identity asserted by a valid session token. Verification is stateless.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i32,
    pub name: String,
    pub role_id: i32,
    pub expires_at: i64,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        SessionUser {
            user_id: claims.sub,
            name: claims.name,
            role_id: claims.role,
            expires_at: claims.exp,
        }
    }
}

impl FromRequestParts<SharedState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Bearer header wins over the cookie
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let claims = jwt::decode_token(token, &state.config.jwt_secret)
                    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;
                return Ok(claims.into());
            }
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
            let claims = jwt::decode_token(cookie.value(), &state.config.jwt_secret)
                .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;
            return Ok(claims.into());
        }

        Err(AppError::Unauthorized(
            "Missing authentication token".to_string(),
        ))
    }
}
