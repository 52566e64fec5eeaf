use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/arenas/:arena_id/schedules",
        get(handlers::schedules::list_arena_schedules)
            .put(handlers::schedules::upsert_arena_schedule),
    )
}
