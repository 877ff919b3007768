use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{CategoryCount, DiningHall, Dish, DishFilter, DishWithHall, NewDish};

/// Escapes LIKE wildcards so user input is matched literally.
pub(crate) fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ---- Dining halls ----

pub async fn list_halls(db: &PgPool) -> anyhow::Result<Vec<DiningHall>> {
    let rows = sqlx::query_as::<_, DiningHall>(
        r#"
        SELECT id, name, location, created_at
          FROM dining_halls
         ORDER BY name
        "#,
    )
    .fetch_all(db)
    .await
    .context("list dining halls")?;
    Ok(rows)
}

pub async fn find_hall(db: &PgPool, id: Uuid) -> anyhow::Result<Option<DiningHall>> {
    let row = sqlx::query_as::<_, DiningHall>(
        r#"SELECT id, name, location, created_at FROM dining_halls WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find dining hall")?;
    Ok(row)
}

pub async fn hall_name_taken(db: &PgPool, name: &str) -> anyhow::Result<bool> {
    let taken: bool = sqlx::query_scalar(
        r#"SELECT EXISTS (SELECT 1 FROM dining_halls WHERE lower(name) = lower($1))"#,
    )
    .bind(name)
    .fetch_one(db)
    .await
    .context("check dining hall name")?;
    Ok(taken)
}

pub async fn create_hall(db: &PgPool, name: &str, location: &str) -> anyhow::Result<DiningHall> {
    let row = sqlx::query_as::<_, DiningHall>(
        r#"
        INSERT INTO dining_halls (name, location)
        VALUES ($1, $2)
        RETURNING id, name, location, created_at
        "#,
    )
    .bind(name)
    .bind(location)
    .fetch_one(db)
    .await
    .context("insert dining hall")?;
    Ok(row)
}

// ---- Dishes ----

pub async fn list_dishes(db: &PgPool, filter: &DishFilter) -> anyhow::Result<Vec<DishWithHall>> {
    let rows = sqlx::query_as::<_, DishWithHall>(
        r#"
        SELECT d.id, d.dining_hall_id, d.name, d.category,
               d.calories, d.protein, d.carbohydrate, d.fat, d.created_at,
               h.name AS dining_hall_name
          FROM dishes d
          JOIN dining_halls h ON h.id = d.dining_hall_id
         WHERE ($1::text IS NULL OR d.name ILIKE $1)
           AND ($2::text IS NULL OR lower(d.category) = lower($2))
           AND ($3::uuid IS NULL OR d.dining_hall_id = $3)
         ORDER BY h.name, d.name
        "#,
    )
    .bind(filter.search.as_deref().map(like_pattern))
    .bind(filter.category.as_deref())
    .bind(filter.hall_id)
    .fetch_all(db)
    .await
    .context("list dishes")?;
    Ok(rows)
}

pub async fn find_dish(db: &PgPool, id: Uuid) -> anyhow::Result<Option<DishWithHall>> {
    let row = sqlx::query_as::<_, DishWithHall>(
        r#"
        SELECT d.id, d.dining_hall_id, d.name, d.category,
               d.calories, d.protein, d.carbohydrate, d.fat, d.created_at,
               h.name AS dining_hall_name
          FROM dishes d
          JOIN dining_halls h ON h.id = d.dining_hall_id
         WHERE d.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find dish")?;
    Ok(row)
}

pub async fn find_dishes_by_ids(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<Dish>> {
    let rows = sqlx::query_as::<_, Dish>(
        r#"
        SELECT id, dining_hall_id, name, category,
               calories, protein, carbohydrate, fat, created_at
          FROM dishes
         WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(db)
    .await
    .context("find dishes by ids")?;
    Ok(rows)
}

pub async fn dish_name_taken(db: &PgPool, hall_id: Uuid, name: &str) -> anyhow::Result<bool> {
    let taken: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM dishes WHERE dining_hall_id = $1 AND lower(name) = lower($2)
        )
        "#,
    )
    .bind(hall_id)
    .bind(name)
    .fetch_one(db)
    .await
    .context("check dish name")?;
    Ok(taken)
}

pub async fn create_dish(db: &PgPool, new: &NewDish) -> anyhow::Result<Dish> {
    let row = sqlx::query_as::<_, Dish>(
        r#"
        INSERT INTO dishes (dining_hall_id, name, category, calories, protein, carbohydrate, fat)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, dining_hall_id, name, category,
                  calories, protein, carbohydrate, fat, created_at
        "#,
    )
    .bind(new.dining_hall_id)
    .bind(&new.name)
    .bind(&new.category)
    .bind(new.profile.calories)
    .bind(new.profile.protein)
    .bind(new.profile.carbohydrate)
    .bind(new.profile.fat)
    .fetch_one(db)
    .await
    .context("insert dish")?;
    Ok(row)
}

// ---- Stats ----

pub async fn dishes_by_category(db: &PgPool) -> anyhow::Result<Vec<CategoryCount>> {
    let rows = sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT category, COUNT(*) AS count
          FROM dishes
         GROUP BY category
         ORDER BY count DESC, category
        "#,
    )
    .fetch_all(db)
    .await
    .context("count dishes by category")?;
    Ok(rows)
}

pub async fn catalog_counts(db: &PgPool) -> anyhow::Result<(i64, i64)> {
    let counts: (i64, i64) = sqlx::query_as(
        r#"
        SELECT (SELECT COUNT(*) FROM dishes), (SELECT COUNT(*) FROM dining_halls)
        "#,
    )
    .fetch_one(db)
    .await
    .context("count catalog")?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rice"), "%rice%");
        assert_eq!(like_pattern("100%_beef"), "%100\\%\\_beef%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
