use sqlx::PgPool;

use crate::models::user::NewUser;
use crate::models::User;

/// Insert a user. Duplicate id or email surfaces as a unique violation.
pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user: &NewUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, given_name, paternal_surname, maternal_surname, email,
                            password_hash, postal_code, neighborhood, street, street_number,
                            sex, date_of_birth, avatar, role_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *",
    )
    .bind(user.id)
    .bind(user.given_name)
    .bind(user.paternal_surname)
    .bind(user.maternal_surname)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.postal_code)
    .bind(user.neighborhood)
    .bind(user.street)
    .bind(user.street_number)
    .bind(user.sex)
    .bind(user.date_of_birth)
    .bind(user.avatar)
    .bind(user.role_id)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn link_membership<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: i32,
    membership_id: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO user_memberships (user_id, membership_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(membership_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn find_membership_id(pool: &PgPool, user_id: i32) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT membership_id FROM user_memberships WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
