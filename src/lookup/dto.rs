use serde::{Deserialize, Serialize};

use super::services::FoodMatch;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub query: String,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub query: String,
    pub count: usize,
    pub foods: Vec<FoodMatch>,
}
