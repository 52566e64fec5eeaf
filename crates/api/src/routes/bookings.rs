use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route(
            "/api/bookings/:id/confirm-payment",
            post(handlers::bookings::confirm_payment),
        )
        .route(
            "/api/users/:user_id/bookings",
            get(handlers::bookings::list_user_bookings),
        )
        .route(
            "/api/courts/:court_id/bookings",
            get(handlers::bookings::list_court_bookings),
        )
}
