use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::{MealRecord, NutritionTotals};

/// Logged meal. Rows are never updated; totals are whatever was frozen at
/// logging time and may be null.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    #[serde(with = "crate::dates::iso_date")]
    pub eaten_on: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Meal {
    pub fn as_record(&self) -> MealRecord<'_> {
        MealRecord {
            category: self.category.as_deref(),
            calories: self.calories,
            protein: self.protein,
            carbohydrate: self.carbohydrate,
            fat: self.fat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DayCount {
    #[serde(with = "crate::dates::iso_date")]
    pub day: Date,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub user_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub totals: StoredTotals,
    pub eaten_on: Option<Date>,
}

/// Nutrient columns as written to the log.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StoredTotals {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
}

impl From<NutritionTotals> for StoredTotals {
    fn from(t: NutritionTotals) -> Self {
        Self {
            calories: Some(t.calories),
            protein: Some(t.protein),
            carbohydrate: Some(t.carbohydrate),
            fat: Some(t.fat),
        }
    }
}

impl StoredTotals {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbohydrate.is_none()
            && self.fat.is_none()
    }
}
