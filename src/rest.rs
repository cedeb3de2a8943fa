use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{auth::gate, handlers, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::gate_middleware,
        ))
        .with_state(state)
}
