use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use concierge_booking::{BookingFilter, BookingView};
use concierge_core::Permission;
use concierge_shared::{ListingKind, Note};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, middleware::ConsoleClaims, state::AppState};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAction {
    Approve,
    Decline,
    Reset,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub body: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(list_bookings))
        .route("/v1/bookings/{id}", get(get_booking))
        .route("/v1/bookings/{id}/items/{kind}/{action}", post(decide_item))
        .route("/v1/bookings/{id}/approve-all", post(approve_all))
        .route("/v1/bookings/{id}/decline-all", post(decline_all))
        .route("/v1/bookings/{id}/notes", post(add_note))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/bookings?status=&q=
async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    claims.actor().require(Permission::ViewBookings)?;
    let store = state.store.read().await;

    let views = store
        .bookings
        .list(&filter)
        .into_iter()
        .map(|b| BookingView::for_role(b, claims.role))
        .collect();
    Ok(Json(views))
}

/// GET /v1/bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    claims.actor().require(Permission::ViewBookingDetail)?;
    let store = state.store.read().await;

    let booking = store
        .bookings
        .get(&booking_id)
        .ok_or_else(|| AppError::NotFoundError(format!("Booking not found: {}", booking_id)))?;
    Ok(Json(BookingView::for_role(booking, claims.role)))
}

/// POST /v1/bookings/{id}/items/{kind}/{approve|decline|reset}
async fn decide_item(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path((booking_id, kind, action)): Path<(Uuid, ListingKind, ItemAction)>,
) -> Result<Json<BookingView>, AppError> {
    let actor = claims.actor();
    let mut store = state.store.write().await;

    let booking = match action {
        ItemAction::Approve => store.bookings.approve_item(&booking_id, kind, &actor)?,
        ItemAction::Decline => store.bookings.decline_item(&booking_id, kind, &actor)?,
        ItemAction::Reset => store.bookings.reset_item(&booking_id, kind, &actor)?,
    };
    Ok(Json(BookingView::for_role(booking, claims.role)))
}

/// POST /v1/bookings/{id}/approve-all
async fn approve_all(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    let mut store = state.store.write().await;
    let booking = store.bookings.approve_all(&booking_id, &claims.actor())?;
    Ok(Json(BookingView::for_role(booking, claims.role)))
}

/// POST /v1/bookings/{id}/decline-all
async fn decline_all(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    let mut store = state.store.write().await;
    let booking = store.bookings.decline_all(&booking_id, &claims.actor())?;
    Ok(Json(BookingView::for_role(booking, claims.role)))
}

/// POST /v1/bookings/{id}/notes
async fn add_note(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<Note>, AppError> {
    let mut store = state.store.write().await;
    let note = store.bookings.add_note(&booking_id, &claims.actor(), &req.body)?;
    Ok(Json(note))
}
