use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

impl User {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, net_id, email, password_hash, first_name, last_name,
                   sex, age, height_cm, weight_kg, goal, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    pub async fn find_by_net_id(db: &PgPool, net_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, net_id, email, password_hash, first_name, last_name,
                   sex, age, height_cm, weight_kg, goal, created_at
            FROM users
            WHERE net_id = $1
            "#,
        )
        .bind(net_id)
        .fetch_optional(db)
        .await
        .context("find user by net_id")?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, net_id, email, password_hash, first_name, last_name,
                   sex, age, height_cm, weight_kg, goal, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Create a new user with an already hashed password.
    pub async fn create(db: &PgPool, new: &NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (net_id, email, password_hash, first_name, last_name,
                               sex, age, height_cm, weight_kg, goal)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, net_id, email, password_hash, first_name, last_name,
                      sex, age, height_cm, weight_kg, goal, created_at
            "#,
        )
        .bind(&new.net_id)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.sex.map(|s| s.as_str()))
        .bind(new.age)
        .bind(new.height_cm)
        .bind(new.weight_kg)
        .bind(new.goal.map(|g| g.as_str()))
        .fetch_one(db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}
