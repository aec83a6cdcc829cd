use axum::{extract::State, routing::get, Extension, Json, Router};
use concierge_accounts::UserProfile;
use concierge_booking::{BookingFilter, BookingRequest};
use concierge_catalog::{Listing, ListingFilter};
use concierge_core::Permission;
use serde::Serialize;

use crate::{error::AppError, middleware::ConsoleClaims, state::AppState};

/// Full data set with raw contact details
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub bookings: Vec<BookingRequest>,
    pub listings: Vec<Listing>,
    pub users: Vec<UserProfile>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/export", get(export))
}

/// GET /v1/export
async fn export(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
) -> Result<Json<ExportResponse>, AppError> {
    claims.actor().require(Permission::ExportData)?;
    let store = state.store.read().await;

    let response = ExportResponse {
        bookings: store.bookings.list(&BookingFilter::default()).into_iter().cloned().collect(),
        listings: store.listings.list(&ListingFilter::default()).into_iter().cloned().collect(),
        users: store.accounts.list(None).into_iter().cloned().collect(),
    };
    tracing::info!(
        actor = %claims.user,
        bookings = response.bookings.len(),
        users = response.users.len(),
        "data exported"
    );
    Ok(Json(response))
}
