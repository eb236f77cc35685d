/*
 * Responsibility
 * - /drinks 系 CRUD handler
 * - 認可は middleware 側で済んでいる前提 (保護 route は AuthCtx 必須で受け取る)
 * - status の使い分け: 空カタログ/未知 id → 404, create/delete 失敗 → 422, patch 失敗 → 400
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::{
        dto::drinks::{
            CreateDrinkRequest, CreatedResponse, DeletedResponse, DrinkLong, DrinkShort,
            DrinksLongResponse, DrinksShortResponse, UpdateDrinkRequest,
        },
        extractors::AuthCtxExtractor,
    },
    error::ApiError,
    repos::drink_repo::Ingredient,
    state::AppState,
};

/// GET /drinks: public, short representation only.
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksShortResponse>, ApiError> {
    let records = state.store.list().await?;

    if records.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DrinksShortResponse {
        success: true,
        drinks: records.into_iter().map(DrinkShort::from_record).collect(),
    }))
}

/// GET /drinks-detail: long representation, gated on `get:drinks-detail`.
pub async fn list_drinks_detail(
    State(state): State<AppState>,
    AuthCtxExtractor(_ctx): AuthCtxExtractor,
) -> Result<Json<DrinksLongResponse>, ApiError> {
    let records = state.store.list().await?;

    if records.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DrinksLongResponse {
        success: true,
        drinks: records.into_iter().map(DrinkLong::from_record).collect(),
    }))
}

/// POST /drinks/create, gated on `post:drinks`.
pub async fn create_drink(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreateDrinkRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    req.validate().map_err(|_| ApiError::Unprocessable)?;

    let (Some(title), Some(recipe)) = (req.title, req.recipe) else {
        return Err(ApiError::Unprocessable);
    };
    let recipe: Vec<Ingredient> = recipe.into_iter().map(Ingredient::from).collect();

    let record = state
        .store
        .insert(title.trim(), &recipe)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "drink insert failed");
            ApiError::Unprocessable
        })?;

    tracing::info!(sub = %ctx.sub, drink_id = record.id, "drink created");

    Ok(Json(CreatedResponse {
        success: true,
        created: vec![DrinkLong::from_record(record)],
    }))
}

/// PATCH /drinks/{id}, gated on `patch:drinks`.
pub async fn update_drink(
    State(state): State<AppState>,
    AuthCtxExtractor(_ctx): AuthCtxExtractor,
    Path(drink_id): Path<i64>,
    Json(req): Json<UpdateDrinkRequest>,
) -> Result<Json<DrinksLongResponse>, ApiError> {
    req.validate().map_err(|_| ApiError::BadRequest)?;

    let recipe: Option<Vec<Ingredient>> = req
        .recipe
        .map(|r| r.into_iter().map(Ingredient::from).collect());

    let record = state
        .store
        .update(drink_id, req.title.as_deref(), recipe.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, drink_id, "drink update failed");
            ApiError::BadRequest
        })?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(DrinksLongResponse {
        success: true,
        drinks: vec![DrinkLong::from_record(record)],
    }))
}

/// DELETE /drinks/{id}, gated on `delete:drinks`.
pub async fn delete_drink(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(drink_id): Path<i64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state.store.delete(drink_id).await.map_err(|e| {
        tracing::error!(error = ?e, drink_id, "drink delete failed");
        ApiError::Unprocessable
    })?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    tracing::info!(sub = %ctx.sub, drink_id, "drink deleted");

    Ok(Json(DeletedResponse {
        success: true,
        deleted: drink_id,
    }))
}
