/*
 * Responsibility
 * - URL 構造を定義 (/health, /drinks, /drinks-detail, /drinks/create, /drinks/{id})
 * - permission が必要な範囲は middleware::auth::access の table 側で宣言する
 */
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    drinks::{create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink},
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/drinks", get(list_drinks))
        .route("/drinks-detail", get(list_drinks_detail))
        .route("/drinks/create", post(create_drink))
        .route("/drinks/{drink_id}", patch(update_drink).delete(delete_drink))
}
