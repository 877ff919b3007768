use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CatalogStats, CreateDishRequest, CreateHallRequest, DishQuery},
    repo,
    repo_types::{CategoryCount, DiningHall, Dish, DishFilter, DishWithHall, NewDish},
    services::{macro_breakdown, validate_profile, MacroBreakdown},
};
use crate::{
    auth::jwt::AuthUser,
    errors::{ApiError, ApiResult},
    nutrition::NutrientProfile,
    state::AppState,
};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/halls", get(list_halls).post(create_hall))
        .route("/halls/:id/dishes", get(list_hall_dishes))
        .route("/dishes", get(list_dishes).post(create_dish))
        .route("/dishes/:id", get(get_dish))
        .route("/dishes/:id/macros", get(dish_macros))
        .route("/stats/dishes-by-category", get(dishes_by_category))
        .route("/stats/catalog", get(catalog_stats))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[instrument(skip(state))]
pub async fn list_halls(State(state): State<AppState>) -> ApiResult<Json<Vec<DiningHall>>> {
    Ok(Json(repo::list_halls(&state.db).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_hall(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateHallRequest>,
) -> ApiResult<(StatusCode, Json<DiningHall>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::invalid_input("Dining hall name is required"));
    }
    if repo::hall_name_taken(&state.db, name).await? {
        warn!(%name, "duplicate dining hall");
        return Err(ApiError::conflict("Dining hall already exists"));
    }

    let hall = repo::create_hall(&state.db, name, payload.location.trim())
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Dining hall already exists"))?;
    info!(%user_id, hall_id = %hall.id, "dining hall created");
    Ok((StatusCode::CREATED, Json(hall)))
}

#[instrument(skip(state))]
pub async fn list_hall_dishes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<DishWithHall>>> {
    repo::find_hall(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Dining hall"))?;
    let filter = DishFilter {
        hall_id: Some(id),
        ..Default::default()
    };
    Ok(Json(repo::list_dishes(&state.db, &filter).await?))
}

#[instrument(skip(state))]
pub async fn list_dishes(
    State(state): State<AppState>,
    Query(q): Query<DishQuery>,
) -> ApiResult<Json<Vec<DishWithHall>>> {
    let filter = DishFilter {
        search: non_blank(q.search),
        category: non_blank(q.category),
        hall_id: q.hall_id,
    };
    Ok(Json(repo::list_dishes(&state.db, &filter).await?))
}

#[instrument(skip(state))]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DishWithHall>> {
    let dish = repo::find_dish(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Dish"))?;
    Ok(Json(dish))
}

#[instrument(skip(state))]
pub async fn dish_macros(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MacroBreakdown>> {
    let dish = repo::find_dish(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Dish"))?;
    Ok(Json(macro_breakdown(&dish.dish.profile())))
}

#[instrument(skip(state, payload))]
pub async fn create_dish(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateDishRequest>,
) -> ApiResult<(StatusCode, Json<Dish>)> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::invalid_input("Dish name is required"));
    }
    let Some(hall_id) = payload.dining_hall_id else {
        return Err(ApiError::invalid_input("Dining hall is required"));
    };
    let profile = NutrientProfile {
        calories: payload.calories,
        protein: payload.protein,
        carbohydrate: payload.carbohydrate,
        fat: payload.fat,
    };
    validate_profile(&profile)?;

    repo::find_hall(&state.db, hall_id)
        .await?
        .ok_or(ApiError::NotFound("Dining hall"))?;
    if repo::dish_name_taken(&state.db, hall_id, &name).await? {
        warn!(%name, %hall_id, "duplicate dish");
        return Err(ApiError::conflict("Dish already exists in this dining hall"));
    }

    let new = NewDish {
        dining_hall_id: hall_id,
        name,
        category: non_blank(payload.category).unwrap_or_else(|| "General".to_string()),
        profile,
    };
    let dish = repo::create_dish(&state.db, &new)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Dish already exists in this dining hall"))?;
    info!(%user_id, dish_id = %dish.id, "dish created");
    Ok((StatusCode::CREATED, Json(dish)))
}

#[instrument(skip(state))]
pub async fn dishes_by_category(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryCount>>> {
    Ok(Json(repo::dishes_by_category(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn catalog_stats(State(state): State<AppState>) -> ApiResult<Json<CatalogStats>> {
    let (total_dishes, total_halls) = repo::catalog_counts(&state.db).await?;
    Ok(Json(CatalogStats {
        total_dishes,
        total_halls,
    }))
}
