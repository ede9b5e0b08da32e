use std::any::Any;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::handlers::health_handler;
use crate::handlers::oauth::exchange_handler;
use crate::models::{AppConfig, AppState};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(300);

pub fn build_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config);

    let app = Router::new()
        .route("/", get(health_handler))
        .route("/oauth", post(exchange_handler))
        .with_state(app_state);

    with_middleware(app, cors)
}

/// Access logging outermost, then the panic boundary, then CORS.
/// A panic's 500 therefore carries no CORS headers, same as chi's Recoverer.
fn with_middleware(router: Router, cors: CorsLayer) -> Router {
    let access_log = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(access_log)
}

/// `Access-Control-Allow-Origin` is only sent when the request's `Origin`
/// matches the configured one.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.allowed_origin.clone()]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(false)
        .max_age(PREFLIGHT_MAX_AGE)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = details, "handler panicked");

    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
