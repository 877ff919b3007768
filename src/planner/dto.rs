use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::TempMeal;
use crate::{
    catalog::dto::PortionRequest,
    nutrition::{matcher::ContainedDish, MatchMode, MatchedMeal, NutritionTotals, TempMealRecord},
};

#[derive(Debug, Default, Deserialize)]
pub struct DishSearch {
    /// Comma-separated dish names.
    #[serde(default)]
    pub dishes: String,
}

#[derive(Debug, Serialize)]
pub struct DishSearchResponse {
    pub mode: &'static str,
    pub count: usize,
    pub results: Vec<MatchedMeal>,
}

impl DishSearchResponse {
    pub fn new(mode: MatchMode, results: Vec<MatchedMeal>) -> Self {
        Self {
            mode: mode_label(mode),
            count: results.len(),
            results,
        }
    }
}

pub fn mode_label(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::Fuzzy => "GET_Simple_Search",
        MatchMode::Exact => "POST_Snapshot_Search",
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTempMealRequest {
    pub name: String,
    pub items: Vec<PortionRequest>,
}

#[derive(Debug, Serialize)]
pub struct TempMealDetail {
    pub id: Uuid,
    pub name: String,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub totals: NutritionTotals,
    pub items: Vec<ContainedDish>,
}

impl TempMealDetail {
    pub fn new(meal: TempMeal, record: Option<TempMealRecord>) -> Self {
        let (totals, items) = match record {
            Some(r) => {
                let matched = r.to_matched();
                (matched.totals, matched.items)
            }
            None => (NutritionTotals::default(), Vec::new()),
        };
        Self {
            id: meal.id,
            name: meal.name,
            created_by: meal.created_by,
            created_at: meal.created_at,
            totals,
            items,
        }
    }
}
