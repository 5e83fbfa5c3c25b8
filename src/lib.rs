rust_i18n::i18n!("locales", fallback = "ar");

pub mod challenges;
pub mod competition;
pub mod db;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;

use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::competition::routes())
        .merge(handlers::challenges::routes())
        .merge(handlers::account::routes())
        .merge(handlers::content::routes())
        .merge(handlers::admin::routes())
        .with_state(state)
}
