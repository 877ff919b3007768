use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::{dto::PortionRequest, repo, repo_types::Dish};
use crate::{
    errors::{ApiError, ApiResult},
    nutrition::{aggregate::round1, LineItem, NutrientProfile},
};

pub const MACRO_LABELS: [&str; 3] = ["Protein", "Carbs", "Fat"];

/// Gram and percentage split of a dish's macros, the data behind a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroBreakdown {
    pub labels: [&'static str; 3],
    pub grams: [f64; 3],
    pub percentages: [f64; 3],
}

pub fn macro_breakdown(profile: &NutrientProfile) -> MacroBreakdown {
    let grams = [profile.protein, profile.carbohydrate, profile.fat];
    let total: f64 = grams.iter().sum();
    let percentages = if total > 0.0 {
        grams.map(|g| round1(g * 100.0 / total))
    } else {
        [0.0; 3]
    };
    MacroBreakdown {
        labels: MACRO_LABELS,
        grams,
        percentages,
    }
}

pub fn validate_profile(profile: &NutrientProfile) -> ApiResult<()> {
    let fields = [
        ("calories", profile.calories),
        ("protein", profile.protein),
        ("carbohydrate", profile.carbohydrate),
        ("fat", profile.fat),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::invalid_input(format!(
                "{name} must be a non-negative number"
            )));
        }
    }
    Ok(())
}

/// Rejects empty portion lists and non-positive weights.
pub fn validate_portions(items: &[PortionRequest]) -> ApiResult<()> {
    if items.is_empty() {
        return Err(ApiError::invalid_input("items must be non-empty"));
    }
    if let Some(bad) = items
        .iter()
        .find(|i| !(i.weight_grams.is_finite() && i.weight_grams > 0.0))
    {
        return Err(ApiError::invalid_input(format!(
            "weight_grams must be greater than zero (dish {})",
            bad.dish_id
        )));
    }
    Ok(())
}

/// A requested portion resolved against the catalog.
#[derive(Debug, Clone)]
pub struct Portion {
    pub dish: Dish,
    pub weight_grams: f64,
}

impl Portion {
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.dish.profile(), self.weight_grams)
    }
}

/// Validates the requested portions, then loads their dishes in request
/// order. Any unknown dish id is a `NotFound`.
pub async fn resolve_portions(db: &PgPool, items: &[PortionRequest]) -> ApiResult<Vec<Portion>> {
    validate_portions(items)?;

    let ids: Vec<Uuid> = items.iter().map(|i| i.dish_id).collect();
    let dishes: HashMap<Uuid, Dish> = repo::find_dishes_by_ids(db, &ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    items
        .iter()
        .map(|i| {
            dishes
                .get(&i.dish_id)
                .cloned()
                .map(|dish| Portion {
                    dish,
                    weight_grams: i.weight_grams,
                })
                .ok_or(ApiError::NotFound("Dish"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_splits_by_grams() {
        let b = macro_breakdown(&NutrientProfile {
            calories: 165.0,
            protein: 31.0,
            carbohydrate: 0.0,
            fat: 3.6,
        });
        assert_eq!(b.labels, ["Protein", "Carbs", "Fat"]);
        assert_eq!(b.grams, [31.0, 0.0, 3.6]);
        assert_eq!(b.percentages, [89.6, 0.0, 10.4]);
    }

    #[test]
    fn breakdown_without_macro_data_is_zero() {
        let b = macro_breakdown(&NutrientProfile::default());
        assert_eq!(b.percentages, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn negative_or_nan_nutrients_are_rejected() {
        let ok = NutrientProfile {
            calories: 100.0,
            ..Default::default()
        };
        assert!(validate_profile(&ok).is_ok());
        let negative = NutrientProfile { fat: -1.0, ..ok };
        assert!(matches!(validate_profile(&negative), Err(ApiError::InvalidInput(_))));
        let nan = NutrientProfile { protein: f64::NAN, ..ok };
        assert!(validate_profile(&nan).is_err());
    }

    #[test]
    fn portions_need_positive_weights() {
        assert!(validate_portions(&[]).is_err());
        let good = PortionRequest {
            dish_id: Uuid::new_v4(),
            weight_grams: 150.0,
        };
        assert!(validate_portions(&[good.clone()]).is_ok());
        let zero = PortionRequest {
            weight_grams: 0.0,
            ..good.clone()
        };
        assert!(matches!(
            validate_portions(&[good, zero]),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn resolve_rejects_bad_weights_before_touching_the_database() {
        let state = crate::state::AppState::fake();
        let items = [PortionRequest {
            dish_id: Uuid::new_v4(),
            weight_grams: -5.0,
        }];
        let err = resolve_portions(&state.db, &items).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
