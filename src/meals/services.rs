use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dto::CreateMealRequest,
    repo_types::{NewMeal, StoredTotals},
};
use crate::{
    catalog::services::resolve_portions,
    dates::parse_date,
    errors::{ApiError, ApiResult},
    nutrition::{aggregate_line_items, LineItem},
};

fn explicit_totals(req: &CreateMealRequest) -> ApiResult<StoredTotals> {
    let totals = StoredTotals {
        calories: req.calories,
        protein: req.protein,
        carbohydrate: req.carbohydrate,
        fat: req.fat,
    };
    for value in [totals.calories, totals.protein, totals.carbohydrate, totals.fat]
        .into_iter()
        .flatten()
    {
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::invalid_input("Nutrient totals must be non-negative"));
        }
    }
    Ok(totals)
}

/// Checks everything that needs no database access.
pub fn validate_request(req: &CreateMealRequest) -> ApiResult<()> {
    if req.name.trim().is_empty() {
        return Err(ApiError::invalid_input("Meal name is required"));
    }
    let totals = explicit_totals(req)?;
    if req.items.is_some() && !totals.is_empty() {
        return Err(ApiError::invalid_input(
            "Provide either nutrient totals or items, not both",
        ));
    }
    if let Some(raw) = &req.eaten_on {
        parse_date(raw)?;
    }
    Ok(())
}

/// Builds the log row, snapshotting item totals through the aggregator.
pub async fn prepare_meal(
    db: &PgPool,
    user_id: Uuid,
    req: CreateMealRequest,
) -> ApiResult<NewMeal> {
    validate_request(&req)?;

    let totals = match &req.items {
        Some(items) => {
            let portions = resolve_portions(db, items).await?;
            let lines: Vec<LineItem> = portions.iter().map(|p| p.line_item()).collect();
            StoredTotals::from(aggregate_line_items(&lines))
        }
        None => explicit_totals(&req)?,
    };
    let eaten_on = req.eaten_on.as_deref().map(parse_date).transpose()?;

    Ok(NewMeal {
        user_id,
        name: req.name.trim().to_string(),
        category: req
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        totals,
        eaten_on,
    })
}
