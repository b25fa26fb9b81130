use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::Role;
use crate::routes::auth::MessageResponse;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateRole {
    #[serde(alias = "idRoles")]
    pub id: i32,
    #[serde(alias = "descripcion")]
    pub description: String,
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Role>>, AppError> {
    let roles = db::roles::list(&state.pool).await?;
    Ok(Json(roles))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateRole>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let description = req.description.trim();
    if description.is_empty() {
        return Err(AppError::BadRequest("Description is required".to_string()));
    }
    if description.chars().count() > 20 {
        return Err(AppError::BadRequest(
            "Description must be at most 20 characters".to_string(),
        ));
    }

    let role = db::roles::create(&state.pool, req.id, description)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Role already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(role_id = role.id, "Role created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Role created".to_string(),
        }),
    ))
}
