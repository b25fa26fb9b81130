use sqlx::PgPool;

use crate::models::Membership;

pub async fn create(pool: &PgPool, id: i32, description: &str) -> Result<Membership, sqlx::Error> {
    sqlx::query_as::<_, Membership>(
        "INSERT INTO memberships (id, description) VALUES ($1, $2) RETURNING *",
    )
    .bind(id)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Membership>, sqlx::Error> {
    sqlx::query_as::<_, Membership>("SELECT * FROM memberships ORDER BY id")
        .fetch_all(pool)
        .await
}
