/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: dyn DrinkStore, auth: AuthService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::drink_repo::DrinkStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DrinkStore>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }
}
