use serde::{Deserialize, Serialize};

/// A membership type ("mensual", "anual", ...) a member-role user is linked to.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Membership {
    pub id: i32,
    pub description: String,
}
