use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    catalog::{dto::PortionRequest, services::MACRO_LABELS},
    nutrition::{summary::CategoryCount, MealSummary, NutritionTotals},
};

#[derive(Debug, Default, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub category: Option<String>,
    /// `YYYY-MM-DD`; defaults to today.
    pub eaten_on: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    #[serde(alias = "carbohydrates")]
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    /// When present, totals are computed from these portions instead.
    pub items: Option<Vec<PortionRequest>>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

pub const MAX_PAGE: i64 = 100;

impl Pagination {
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_PAGE), self.offset.max(0))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MacroValues {
    pub labels: [&'static str; 3],
    pub values: [f64; 3],
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(with = "crate::dates::iso_date")]
    pub start: Date,
    #[serde(with = "crate::dates::iso_date")]
    pub end: Date,
    pub count: u64,
    pub by_category: Vec<CategoryCount>,
    pub totals: NutritionTotals,
    pub macros: MacroValues,
}

impl SummaryResponse {
    pub fn new(start: Date, end: Date, summary: MealSummary) -> Self {
        let t = summary.totals;
        Self {
            start,
            end,
            count: summary.count,
            by_category: summary.by_category,
            totals: t,
            macros: MacroValues {
                labels: MACRO_LABELS,
                values: [t.protein, t.carbohydrate, t.fat],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn pagination_defaults_and_bounds() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.clamped(), (20, 0));
        let p = Pagination {
            limit: 10_000,
            offset: -3,
        };
        assert_eq!(p.clamped(), (MAX_PAGE, 0));
    }

    #[test]
    fn summary_response_echoes_range_and_macros() {
        let summary = MealSummary {
            count: 1,
            by_category: vec![CategoryCount {
                label: "Lunch".into(),
                count: 1,
            }],
            totals: NutritionTotals {
                calories: 500.0,
                protein: 30.0,
                carbohydrate: 60.0,
                fat: 12.0,
            },
        };
        let body = serde_json::to_value(SummaryResponse::new(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 07),
            summary,
        ))
        .unwrap();
        assert_eq!(body["start"], "2024-01-01");
        assert_eq!(body["end"], "2024-01-07");
        assert_eq!(body["macros"]["labels"], serde_json::json!(["Protein", "Carbs", "Fat"]));
        assert_eq!(body["macros"]["values"], serde_json::json!([30.0, 60.0, 12.0]));
        assert_eq!(body["by_category"][0]["label"], "Lunch");
    }
}
