use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::SessionUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::{password, ACCESS_TOKEN_COOKIE};
use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::models::user::{decode_avatar, NewUser};
use crate::models::User;
use crate::state::SharedState;

// Field aliases accept the admin front-end's original wire names.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "id_usuario")]
    pub id: i32,
    #[serde(alias = "nombre")]
    pub given_name: String,
    #[serde(alias = "apellidoP")]
    pub paternal_surname: String,
    #[serde(default, alias = "apellidoM")]
    pub maternal_surname: String,
    #[serde(alias = "correo")]
    pub email: String,
    pub password: String,
    #[serde(alias = "cp")]
    pub postal_code: Option<i32>,
    #[serde(alias = "colonia")]
    pub neighborhood: Option<String>,
    #[serde(alias = "calle")]
    pub street: Option<String>,
    #[serde(alias = "numero")]
    pub street_number: Option<i32>,
    #[serde(default, alias = "sexo", deserialize_with = "deserialize_sex")]
    pub sex: Option<String>,
    #[serde(alias = "dob")]
    pub date_of_birth: Option<NaiveDate>,
    /// Base64 image payload.
    #[serde(alias = "imagen")]
    pub avatar: Option<String>,
    #[serde(alias = "rol")]
    pub role: i32,
    #[serde(alias = "idMembresia")]
    pub membership_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SexField {
    Text(String),
    Code(i64),
}

/// The form sends either a label or `1` (masculino) / `0` (femenino).
fn deserialize_sex<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<SexField>::deserialize(deserializer)? {
        Some(SexField::Text(text)) => Some(text),
        Some(SexField::Code(1)) => Some("masculino".to_string()),
        Some(SexField::Code(_)) => Some("femenino".to_string()),
        None => None,
    })
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "id_usuario")]
    pub id: i32,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: i32,
    pub name: String,
    pub role: i32,
    pub expires_at: i64,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn session_cookie(config: &Config, token: &str) -> CookieJar {
    let access = Cookie::build((ACCESS_TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.cookie.secure)
        .same_site(config.cookie.same_site)
        .max_age(time::Duration::hours(config.token_ttl_hours))
        .build();

    CookieJar::new().add(access)
}

fn clear_session_cookie() -> CookieJar {
    let access = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access)
}

fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value)
}

/// Column widths from the `users` table.
fn within(value: &str, max: usize, field: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let given_name = non_empty(&req.given_name, "given_name")?;
    let paternal_surname = non_empty(&req.paternal_surname, "paternal_surname")?;
    let maternal_surname = req.maternal_surname.trim();
    // Stored lowercased so uniqueness ignores case
    let email = non_empty(&req.email, "email")?.to_lowercase();
    if !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("password is required".to_string()));
    }

    within(given_name, 45, "given_name")?;
    within(paternal_surname, 50, "paternal_surname")?;
    within(maternal_surname, 50, "maternal_surname")?;
    within(&email, 50, "email")?;
    within(req.neighborhood.as_deref().unwrap_or_default(), 100, "neighborhood")?;
    within(req.street.as_deref().unwrap_or_default(), 100, "street")?;
    within(req.sex.as_deref().unwrap_or_default(), 10, "sex")?;

    let avatar = req
        .avatar
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(decode_avatar)
        .transpose()
        .map_err(|_| AppError::BadRequest("Avatar must be base64 encoded".to_string()))?;

    if state.config.member_role_id == Some(req.role) && req.membership_id.is_none() {
        return Err(AppError::BadRequest(
            "membership_id is required for members".to_string(),
        ));
    }

    let pw_hash =
        password::hash(&req.password, state.config.bcrypt_cost).map_err(AppError::Internal)?;

    let new_user = NewUser {
        id: req.id,
        given_name,
        paternal_surname,
        maternal_surname,
        email: &email,
        password_hash: &pw_hash,
        postal_code: req.postal_code,
        neighborhood: req.neighborhood.as_deref(),
        street: req.street.as_deref(),
        street_number: req.street_number,
        sex: req.sex.as_deref(),
        date_of_birth: req.date_of_birth,
        avatar: avatar.as_deref(),
        role_id: req.role,
    };

    // User and membership link commit together or not at all
    let mut tx = state.pool.begin().await?;

    let user = db::users::create(&mut *tx, &new_user)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User already exists".to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest("Unknown role".to_string())
            }
            _ => AppError::Database(e),
        })?;

    if let Some(membership_id) = req.membership_id {
        db::users::link_membership(&mut *tx, user.id, membership_id)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::BadRequest("Unknown membership".to_string())
                }
                _ => AppError::Database(e),
            })?;
    }

    tx.commit().await?;

    tracing::info!(user_id = user.id, role_id = user.role_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created".to_string(),
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let user = db::users::find_by_id(&state.pool, req.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        tracing::warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    let claims = Claims::new(
        user.id,
        user.given_name.clone(),
        user.role_id,
        Duration::hours(state.config.token_ttl_hours),
    );
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!(user_id = user.id, "User logged in");

    let jar = session_cookie(&state.config, &token);
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user,
            token,
        }),
    ))
}

/// Tokens are stateless, so this only tells the client to drop its cookie.
pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_session_cookie(),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

pub async fn session(session: SessionUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: session.user_id,
        name: session.name,
        role: session.role_id,
        expires_at: session.expires_at,
    })
}
