use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;

use crate::config::Config;

mod catalog;
mod extract;
mod favorites;
mod health;
mod pagination;
mod recipes;
mod shopping_cart;
mod short_link;
mod users;

pub use pagination::Paginated;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recipe_command: foodgram_recipe::Command,
    pub recipe_query: foodgram_recipe::query::Query,
    pub cart_command: foodgram_shopping::Command,
    pub shopping_query: foodgram_shopping::query::Query,
    pub user_command: foodgram_user::Command,
    pub user_query: foodgram_user::query::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Config, state: foodgram_shared::State) -> Self {
        Self {
            config,
            recipe_command: foodgram_recipe::Command::new(state.clone()),
            recipe_query: foodgram_recipe::query::Query(state.clone()),
            cart_command: foodgram_shopping::Command(state.clone()),
            shopping_query: foodgram_shopping::query::Query(state.clone()),
            user_command: foodgram_user::Command::new(state.clone()),
            user_query: foodgram_user::query::Query(state.clone()),
            pool: state.read_db,
        }
    }

    pub fn page(&self, args: foodgram_shared::PageArgs) -> (u64, u64) {
        args.resolve(
            self.config.pagination.default_limit,
            self.config.pagination.max_limit,
        )
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/s/{code}", get(short_link::redirect))
        .route(
            "/api/recipes",
            get(recipes::list).post(recipes::create),
        )
        .route(
            "/api/recipes/download_shopping_cart",
            get(shopping_cart::download),
        )
        .route(
            "/api/recipes/{id}",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route("/api/recipes/{id}/get-link", get(short_link::get_link))
        .route(
            "/api/recipes/{id}/favorite",
            post(favorites::save).delete(favorites::unsave),
        )
        .route(
            "/api/recipes/{id}/shopping_cart",
            post(shopping_cart::add).delete(shopping_cart::remove),
        )
        .route("/api/ingredients", get(catalog::ingredients))
        .route("/api/ingredients/{id}", get(catalog::ingredient))
        .route("/api/tags", get(catalog::tags))
        .route("/api/tags/{id}", get(catalog::tag))
        .route("/api/users", get(users::list))
        .route("/api/users/me", get(users::me))
        .route("/api/users/subscriptions", get(users::subscriptions))
        .route("/api/users/{id}", get(users::detail))
        .route(
            "/api/users/{id}/subscribe",
            post(users::subscribe).delete(users::unsubscribe),
        )
        .fallback(fallback)
        .with_state(app_state)
}

async fn fallback() -> crate::error::AppError {
    crate::error::AppError::NotFound("page")
}
