use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::NutrientProfile;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DiningHall {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Catalog dish; nutrient columns are per 100 g.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Dish {
    pub id: Uuid,
    pub dining_hall_id: Uuid,
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DishWithHall {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub dish: Dish,
    pub dining_hall_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct NewDish {
    pub dining_hall_id: Uuid,
    pub name: String,
    pub category: String,
    pub profile: NutrientProfile,
}

/// Optional filters for dish listing.
#[derive(Debug, Clone, Default)]
pub struct DishFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub hall_id: Option<Uuid>,
}

impl Dish {
    pub fn profile(&self) -> NutrientProfile {
        NutrientProfile {
            calories: self.calories,
            protein: self.protein,
            carbohydrate: self.carbohydrate,
            fat: self.fat,
        }
    }
}
