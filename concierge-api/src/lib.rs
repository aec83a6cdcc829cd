use axum::{
    http::{HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod accounts;
pub mod bookings;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod listings;
pub mod middleware;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
            HeaderName::from_static(middleware::auth::ROLE_HEADER),
            HeaderName::from_static(middleware::auth::USER_HEADER),
        ]);

    let console = Router::new()
        .merge(dashboard::routes())
        .merge(bookings::routes())
        .merge(listings::routes())
        .merge(accounts::routes())
        .merge(export::routes())
        .layer(axum::middleware::from_fn(middleware::console_auth_middleware));

    Router::new()
        .route("/health", get(health))
        .merge(console)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
