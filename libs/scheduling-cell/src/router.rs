// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{Router, routing::get};

use shared_config::AppConfig;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/conflicts/check", get(handlers::check_scheduling_conflicts))
        .with_state(state)
}
