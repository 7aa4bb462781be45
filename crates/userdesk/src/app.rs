use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        pages::index,
        users::{
            create_user, delete_user, edit_user, list_users, new_user, show_user, update_user,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/users/", get(list_users))
        .route("/users", post(create_user))
        .route("/users/new", get(new_user))
        .route("/users/{id}", get(show_user))
        .route("/users/{id}/edit", get(edit_user))
        .route("/users/{id}/patch", post(update_user))
        .route("/users/{id}/delete", post(delete_user));

    Router::new()
        .route("/", get(index))
        .merge(user_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
