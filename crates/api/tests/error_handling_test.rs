mod test_utils;

use axum::http::StatusCode;
use kourt_api::middleware::error_handling::map_error;
use kourt_core::errors::KourtError;
use pretty_assertions::assert_eq;
use serde_json::Value;

use test_utils::TestContext;

#[test]
fn test_error_status_codes() {
    let cases = vec![
        (KourtError::NotFound("booking".to_string()), StatusCode::NOT_FOUND),
        (KourtError::Validation("date".to_string()), StatusCode::BAD_REQUEST),
        (KourtError::Conflict("overlap".to_string()), StatusCode::CONFLICT),
        (KourtError::Authorization("owner".to_string()), StatusCode::FORBIDDEN),
        (
            KourtError::Database(eyre::eyre!("pool timed out")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            KourtError::Internal("boom".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(map_error(err).status(), expected);
    }
}

#[tokio::test]
async fn test_health_check() {
    let response = TestContext::new().server().get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["slot_cache_entries"], 0);
}

#[tokio::test]
async fn test_version() {
    let response = TestContext::new().server().get("/version").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["service"], "kourt-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let response = TestContext::new().server().get("/api/courts").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
