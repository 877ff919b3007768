use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{DayCount, Meal, NewMeal};

const MEAL_COLUMNS: &str = "id, user_id, name, category, calories, protein, carbohydrate, fat, eaten_on, created_at";

pub async fn insert(db: &PgPool, new: &NewMeal) -> anyhow::Result<Meal> {
    let sql = format!(
        r#"
        INSERT INTO meals (user_id, name, category, calories, protein, carbohydrate, fat, eaten_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, CURRENT_DATE))
        RETURNING {MEAL_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, Meal>(&sql)
        .bind(new.user_id)
        .bind(&new.name)
        .bind(new.category.as_deref())
        .bind(new.totals.calories)
        .bind(new.totals.protein)
        .bind(new.totals.carbohydrate)
        .bind(new.totals.fat)
        .bind(new.eaten_on)
        .fetch_one(db)
        .await
        .context("insert meal")?;
    Ok(row)
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Meal>> {
    let sql = format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE user_id = $1
         ORDER BY eaten_on DESC, created_at DESC
         LIMIT $2 OFFSET $3
        "#
    );
    let rows = sqlx::query_as::<_, Meal>(&sql)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("list meals")?;
    Ok(rows)
}

pub async fn find_for_user(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
    let sql = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2");
    let row = sqlx::query_as::<_, Meal>(&sql)
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("find meal")?;
    Ok(row)
}

/// Meals with `start <= eaten_on <= end`.
pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<Meal>> {
    let sql = format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE user_id = $1 AND eaten_on BETWEEN $2 AND $3
         ORDER BY eaten_on, created_at
        "#
    );
    let rows = sqlx::query_as::<_, Meal>(&sql)
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .context("list meals in range")?;
    Ok(rows)
}

pub async fn count_per_day(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<DayCount>> {
    let rows = sqlx::query_as::<_, DayCount>(
        r#"
        SELECT eaten_on AS day, COUNT(*) AS count
          FROM meals
         WHERE user_id = $1
         GROUP BY eaten_on
         ORDER BY eaten_on
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("count meals per day")?;
    Ok(rows)
}
