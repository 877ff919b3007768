use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateHallRequest {
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    #[serde(alias = "dish_name")]
    pub name: String,
    #[serde(alias = "dining_hall")]
    pub dining_hall_id: Option<Uuid>,
    pub category: Option<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default, alias = "carbohydrates")]
    pub carbohydrate: f64,
    #[serde(default)]
    pub fat: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct DishQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub hall_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CatalogStats {
    pub total_dishes: i64,
    pub total_halls: i64,
}

/// One `{dish_id, weight_grams}` portion in a meal or temp-meal request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortionRequest {
    pub dish_id: Uuid,
    pub weight_grams: f64,
}
