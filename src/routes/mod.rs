pub mod graphql;
pub mod health;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        // GraphQL
        .route(
            "/api/graphql",
            get(graphql::graphql_playground).post(graphql::graphql_handler),
        )
        // Users
        .route("/api/users", post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .patch(users::update_profile)
                .delete(users::delete_user),
        )
        .route(
            "/api/users/{id}/socials",
            get(users::list_socials).post(users::add_social),
        )
        .route(
            "/api/users/{id}/room",
            put(users::enter_room).delete(users::leave_room),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // State
        .with_state(state)
}
