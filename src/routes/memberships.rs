use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::Membership;
use crate::routes::auth::MessageResponse;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateMembership {
    #[serde(alias = "idMembresia")]
    pub id: i32,
    #[serde(alias = "descripcion")]
    pub description: String,
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Membership>>, AppError> {
    let memberships = db::memberships::list(&state.pool).await?;
    Ok(Json(memberships))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateMembership>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let description = req.description.trim();
    if description.is_empty() {
        return Err(AppError::BadRequest("Description is required".to_string()));
    }
    if description.chars().count() > 50 {
        return Err(AppError::BadRequest(
            "Description must be at most 50 characters".to_string(),
        ));
    }

    let membership = db::memberships::create(&state.pool, req.id, description)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Membership already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(membership_id = membership.id, "Membership created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Membership created".to_string(),
        }),
    ))
}
