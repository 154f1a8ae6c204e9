use axum::{http::Method, routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod billing;
pub mod bookings;
pub mod error;
pub mod lessons;
pub mod middleware;
pub mod plans;
pub mod state;
pub mod students;
pub mod teachers;
pub mod telemetry;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Everything except login and the health endpoint requires an admin token
    let admin = Router::new()
        .merge(teachers::routes())
        .merge(students::routes())
        .merge(plans::routes())
        .merge(bookings::routes())
        .merge(lessons::routes())
        .merge(billing::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::admin_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/v1/auth", auth::routes())
        .nest("/v1", admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
