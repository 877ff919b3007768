use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{ProfileCard, ProfileUpdate};
use crate::auth::repo_types::User;

pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
           SET first_name = COALESCE($2, first_name),
               last_name  = COALESCE($3, last_name),
               sex        = COALESCE($4, sex),
               age        = COALESCE($5, age),
               height_cm  = COALESCE($6, height_cm),
               weight_kg  = COALESCE($7, weight_kg),
               goal       = COALESCE($8, goal)
         WHERE id = $1
        RETURNING id, net_id, email, password_hash, first_name, last_name,
                  sex, age, height_cm, weight_kg, goal, created_at
        "#,
    )
    .bind(user_id)
    .bind(update.first_name.as_deref())
    .bind(update.last_name.as_deref())
    .bind(update.sex.map(|s| s.as_str()))
    .bind(update.age)
    .bind(update.height_cm)
    .bind(update.weight_kg)
    .bind(update.goal.map(|g| g.as_str()))
    .fetch_optional(db)
    .await
    .context("update profile")?;
    Ok(user)
}

pub async fn list_profile_cards(db: &PgPool) -> anyhow::Result<Vec<ProfileCard>> {
    let rows = sqlx::query_as::<_, ProfileCard>(
        r#"
        SELECT net_id, first_name, last_name, goal
          FROM users
         ORDER BY net_id, first_name, last_name
        "#,
    )
    .fetch_all(db)
    .await
    .context("list profiles")?;
    Ok(rows)
}
