use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{LookupQuery, LookupResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::{
    errors::{ApiError, ApiResult},
    state::AppState,
};

pub fn lookup_routes() -> Router<AppState> {
    Router::new().route("/lookup/foods", get(search_foods))
}

/// Validated `(query, page_size)`.
fn validate(q: &LookupQuery) -> ApiResult<(String, u32)> {
    let query = q.query.trim();
    if query.is_empty() {
        return Err(ApiError::invalid_input("Search query cannot be empty"));
    }
    let page_size = q.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::invalid_input(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok((query.to_string(), page_size))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(q): Query<LookupQuery>,
) -> ApiResult<Json<LookupResponse>> {
    let (query, page_size) = validate(&q)?;
    let foods = state.food_lookup.search(&query, page_size).await?;
    info!(%query, found = foods.len(), "food lookup");
    Ok(Json(LookupResponse {
        query,
        count: foods.len(),
        foods,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(query: &str, page_size: Option<u32>) -> LookupQuery {
        LookupQuery {
            query: query.into(),
            page_size,
        }
    }

    #[test]
    fn defaults_page_size() {
        assert_eq!(validate(&q(" apple ", None)).unwrap(), ("apple".into(), 10));
    }

    #[test]
    fn rejects_blank_query_and_bad_page_size() {
        assert!(validate(&q("   ", Some(5))).is_err());
        assert!(validate(&q("apple", Some(0))).is_err());
        assert!(validate(&q("apple", Some(51))).is_err());
        assert!(validate(&q("apple", Some(50))).is_ok());
    }
}
