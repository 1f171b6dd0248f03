use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::sign_up::sign_up;
use super::handlers::ApiError;
use crate::domain::signup::models::ValidationPolicy;
use crate::domain::signup::service::SignUpService;
use crate::outbound::repositories::user::InMemoryUserStore;

pub const SIGN_UP_PATH: &str = "/api/auth/signup";

#[derive(Clone)]
pub struct AppState {
    pub signup_service: Arc<SignUpService<InMemoryUserStore>>,
    pub validation_policy: ValidationPolicy,
}

pub fn create_router(
    signup_service: Arc<SignUpService<InMemoryUserStore>>,
    validation_policy: ValidationPolicy,
) -> Router {
    let state = AppState {
        signup_service,
        validation_policy,
    };

    let public_routes = Router::new().route(SIGN_UP_PATH, post(sign_up));

    with_layers(Router::new().merge(public_routes).with_state(state))
}

fn with_layers(router: Router) -> Router {
    // Headers are left out of the span: they may carry credentials
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    ApiError::InternalServerError(format!("Handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        async fn boom() -> &'static str {
            panic!("stack details")
        }

        let router = with_layers(Router::new().route("/boom", get(boom)));

        let response = router
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let service = Arc::new(SignUpService::new(
            Arc::new(InMemoryUserStore::new()),
            auth::PasswordHasher::with_work_factor(1).unwrap(),
            Duration::from_secs(30),
        ));
        let router = create_router(service, ValidationPolicy::default());

        let response = router
            .oneshot(
                Request::post(SIGN_UP_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Invalid request body" })
        );
    }
}
