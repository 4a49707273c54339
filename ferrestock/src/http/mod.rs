// Module: http
// Health endpoints and the fallback used when the database is unreachable

pub mod error;
pub mod health;

use axum::Router;
use ferrestock_core::Database;
use tower_http::trace::TraceLayer;

pub use error::AppError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Router served once the database handle is up
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::create_health_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router served when the handle could not be built
///
/// Every path answers with `error`.
pub fn create_degraded_router(error: AppError) -> Router {
    Router::new()
        .fallback(move || {
            let error = error.clone();
            async move { error }
        })
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use ferrestock_core::{config::DatabaseConfig, HealthReport, HealthStatus};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn closed_state() -> AppState {
        let db = Database::connect_lazy(&DatabaseConfig::default());
        db.close().await;
        AppState::new(db)
    }

    #[tokio::test]
    async fn test_liveness_ignores_database() {
        let response = get(create_router(closed_state().await), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"OK");
    }

    #[tokio::test]
    async fn test_database_health_reports_failure() {
        let response = get(create_router(closed_state().await), "/health/db").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let report: HealthReport = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert!(report.error.is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_when_healthy() {
        let response = get(create_router(closed_state().await), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_degraded_router_answers_500_everywhere() {
        let router = create_degraded_router(AppError::database_connection());
        for uri in ["/", "/health", "/health/db", "/productos"] {
            let response = get(router.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(
                body_bytes(response).await,
                error::DATABASE_CONNECTION_ERROR.as_bytes()
            );
        }
    }
}
