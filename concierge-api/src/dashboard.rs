use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use concierge_booking::BookingSummary;
use concierge_catalog::{ListingFilter, ListingStatus};
use concierge_core::Permission;
use serde::Serialize;

use crate::{error::AppError, middleware::ConsoleClaims, state::AppState};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub bookings: BookingSummary,
    pub active_listings: usize,
    pub active_users: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/dashboard", get(dashboard))
}

/// GET /v1/dashboard
async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
) -> Result<Json<DashboardResponse>, AppError> {
    claims.actor().require(Permission::ViewBookings)?;
    let store = state.store.read().await;

    let active = ListingFilter {
        status: Some(ListingStatus::Active),
        ..Default::default()
    };

    Ok(Json(DashboardResponse {
        bookings: BookingSummary::build(store.bookings.iter()),
        active_listings: store.listings.list(&active).len(),
        active_users: store.accounts.list(None).into_iter().filter(|u| u.is_active()).count(),
    }))
}
