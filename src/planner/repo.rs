use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{group_records, TempMeal, TempMealItemRow};
use crate::{
    catalog::{repo::like_pattern, services::Portion},
    nutrition::TempMealRecord,
};

const ITEM_SELECT: &str = r#"
    SELECT t.id AS temp_meal_id, t.name AS temp_meal_name,
           d.name AS dish_name, i.weight_grams,
           d.calories, d.protein, d.carbohydrate, d.fat
      FROM temp_meals t
      JOIN temp_meal_items i ON i.temp_meal_id = t.id
      JOIN dishes d ON d.id = i.dish_id
"#;

/// Inserts the meal and its items in one transaction.
pub async fn create(
    db: &PgPool,
    name: &str,
    created_by: Uuid,
    portions: &[Portion],
) -> anyhow::Result<TempMeal> {
    let mut tx = db.begin().await.context("begin temp meal tx")?;

    let meal = sqlx::query_as::<_, TempMeal>(
        r#"
        INSERT INTO temp_meals (name, created_by)
        VALUES ($1, $2)
        RETURNING id, name, created_by, created_at
        "#,
    )
    .bind(name)
    .bind(created_by)
    .fetch_one(&mut *tx)
    .await
    .context("insert temp meal")?;

    for portion in portions {
        sqlx::query(
            r#"
            INSERT INTO temp_meal_items (temp_meal_id, dish_id, weight_grams)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(meal.id)
        .bind(portion.dish.id)
        .bind(portion.weight_grams)
        .execute(&mut *tx)
        .await
        .context("insert temp meal item")?;
    }

    tx.commit().await.context("commit temp meal tx")?;
    Ok(meal)
}

pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<TempMeal>> {
    let row = sqlx::query_as::<_, TempMeal>(
        r#"SELECT id, name, created_by, created_at FROM temp_meals WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find temp meal")?;
    Ok(row)
}

pub async fn items_of(db: &PgPool, id: Uuid) -> anyhow::Result<Option<TempMealRecord>> {
    let sql = format!("{ITEM_SELECT} WHERE t.id = $1 ORDER BY i.created_at, i.id");
    let rows = sqlx::query_as::<_, TempMealItemRow>(&sql)
        .bind(id)
        .fetch_all(db)
        .await
        .context("load temp meal items")?;
    Ok(group_records(rows).into_iter().next())
}

/// ILIKE patterns for cleaned (trimmed, lowercased) search tokens.
pub(crate) fn token_patterns(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| like_pattern(t)).collect()
}

/// Temp meals in which every token is a substring of some dish name. This is
/// a superset of both match modes; the matcher makes the final decision.
pub async fn candidate_records(
    db: &PgPool,
    tokens: &[String],
) -> anyhow::Result<Vec<TempMealRecord>> {
    let sql = format!(
        r#"{ITEM_SELECT}
         WHERE NOT EXISTS (
               SELECT 1
                 FROM unnest($1::text[]) AS p(pattern)
                WHERE NOT EXISTS (
                      SELECT 1
                        FROM temp_meal_items ci
                        JOIN dishes cd ON cd.id = ci.dish_id
                       WHERE ci.temp_meal_id = t.id
                         AND cd.name ILIKE p.pattern
                )
         )
         ORDER BY t.created_at, t.id, i.created_at, i.id"#
    );
    let rows = sqlx::query_as::<_, TempMealItemRow>(&sql)
        .bind(token_patterns(tokens))
        .fetch_all(db)
        .await
        .context("load temp meal candidates")?;
    Ok(group_records(rows))
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM temp_meals WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete temp meal")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::token_patterns;

    #[test]
    fn patterns_wrap_and_escape_each_token() {
        let tokens = vec!["rice".to_string(), "100%_beef".to_string()];
        assert_eq!(token_patterns(&tokens), vec!["%rice%", "%100\\%\\_beef%"]);
    }
}
