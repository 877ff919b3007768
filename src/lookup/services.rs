use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::UsdaConfig,
    errors::{ApiError, ApiResult},
};

pub const SERVICE: &str = "USDA API";

const ENERGY_KCAL: u32 = 1008;
const PROTEIN: u32 = 1003;
const FAT: u32 = 1004;
const CARBOHYDRATE: u32 = 1005;

/// A food from the external database with per-100g macros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodMatch {
    pub fdc_id: u64,
    pub description: String,
    pub data_type: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
}

#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn search(&self, query: &str, page_size: u32) -> ApiResult<Vec<FoodMatch>>;
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    fdc_id: u64,
    description: String,
    data_type: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_id: Option<u32>,
    value: Option<f64>,
}

impl From<SearchFood> for FoodMatch {
    fn from(food: SearchFood) -> Self {
        let find = |id: u32| {
            food.food_nutrients
                .iter()
                .find(|n| n.nutrient_id == Some(id))
                .and_then(|n| n.value)
        };
        Self {
            fdc_id: food.fdc_id,
            calories: find(ENERGY_KCAL),
            protein: find(PROTEIN),
            carbohydrate: find(CARBOHYDRATE),
            fat: find(FAT),
            description: food.description,
            data_type: food.data_type,
        }
    }
}

fn parse_search_body(body: &str) -> ApiResult<Vec<FoodMatch>> {
    let parsed: SearchBody = serde_json::from_str(body)
        .map_err(|e| ApiError::external_service(SERVICE, format!("JSON parse error: {e}")))?;
    Ok(parsed.foods.into_iter().map(FoodMatch::from).collect())
}

/// FoodData Central search client. One request per call, bounded by the
/// configured timeout.
pub struct UsdaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Configured timeout, never below one second.
fn request_timeout(config: &UsdaConfig) -> Duration {
    Duration::from_secs(config.timeout_secs.max(1))
}

impl UsdaClient {
    pub fn new(config: &UsdaConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout(config))
            .build()
            .context("build USDA http client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl FoodLookup for UsdaClient {
    async fn search(&self, query: &str, page_size: u32) -> ApiResult<Vec<FoodMatch>> {
        let url = format!("{}/foods/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", &page_size.to_string()),
                ("api_key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "USDA request failed");
                ApiError::external_service(SERVICE, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::external_service(SERVICE, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::external_service(SERVICE, e.to_string()))?;
        let foods = parse_search_body(&body)?;
        debug!(%query, found = foods.len(), "USDA search");
        Ok(foods)
    }
}

/// Canned lookup for tests.
#[cfg(test)]
#[derive(Default)]
pub struct FakeLookup {
    pub foods: Vec<FoodMatch>,
    pub fail: bool,
}

#[cfg(test)]
impl FakeLookup {
    pub fn failing() -> Self {
        Self {
            foods: Vec::new(),
            fail: true,
        }
    }

    pub fn with_foods(foods: Vec<FoodMatch>) -> Self {
        Self { foods, fail: false }
    }
}

#[cfg(test)]
#[async_trait]
impl FoodLookup for FakeLookup {
    async fn search(&self, _query: &str, page_size: u32) -> ApiResult<Vec<FoodMatch>> {
        if self.fail {
            return Err(ApiError::external_service(SERVICE, "timed out"));
        }
        Ok(self.foods.iter().take(page_size as usize).cloned().collect())
    }
}
