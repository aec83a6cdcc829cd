use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use concierge_accounts::{ContactUpdate, UserView};
use concierge_booking::BookingView;
use concierge_core::Permission;
use concierge_shared::Note;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{bookings::NoteRequest, error::AppError, middleware::ConsoleClaims, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LifetimeValueRequest {
    pub lifetime_value_usd: i64,
}

#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserView,
    pub bookings: Vec<BookingView>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/users", get(list_users))
        .route("/v1/users/{id}", get(get_user))
        .route("/v1/users/{id}/contact", put(update_contact))
        .route("/v1/users/{id}/lifetime-value", put(set_lifetime_value))
        .route("/v1/users/{id}/notes", post(add_note))
        .route("/v1/users/{id}/deactivate", post(deactivate))
        .route("/v1/users/{id}/reactivate", post(reactivate))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/users?q=
async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<UserView>>, AppError> {
    claims.actor().require(Permission::ViewUsers)?;
    let store = state.store.read().await;

    let views = store
        .accounts
        .list(query.q.as_deref())
        .into_iter()
        .map(|u| UserView::for_role(u, claims.role))
        .collect();
    Ok(Json(views))
}

/// GET /v1/users/{id}
/// Account plus every booking linked to it, newest first
async fn get_user(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDetailResponse>, AppError> {
    claims.actor().require(Permission::ViewUserDetail)?;
    let store = state.store.read().await;

    let user = store
        .accounts
        .get(&user_id)
        .ok_or_else(|| AppError::NotFoundError(format!("User not found: {}", user_id)))?;

    let mut linked: Vec<_> = store
        .bookings
        .iter()
        .filter(|b| b.customer.user_id == Some(user_id))
        .collect();
    linked.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    // booking details are only shown to roles that may open them
    let bookings = if claims.role.allows(Permission::ViewBookingDetail) {
        linked.into_iter().map(|b| BookingView::for_role(b, claims.role)).collect()
    } else {
        Vec::new()
    };

    Ok(Json(UserDetailResponse {
        user: UserView::for_role(user, claims.role),
        bookings,
    }))
}

/// PUT /v1/users/{id}/contact
async fn update_contact(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<ContactUpdate>,
) -> Result<Json<UserView>, AppError> {
    let mut store = state.store.write().await;
    let user = store.accounts.update_contact(&claims.actor(), &user_id, update)?;
    Ok(Json(UserView::for_role(user, claims.role)))
}

/// PUT /v1/users/{id}/lifetime-value
async fn set_lifetime_value(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<LifetimeValueRequest>,
) -> Result<Json<UserView>, AppError> {
    let mut store = state.store.write().await;
    let user = store
        .accounts
        .set_lifetime_value(&claims.actor(), &user_id, req.lifetime_value_usd)?;
    Ok(Json(UserView::for_role(user, claims.role)))
}

/// POST /v1/users/{id}/notes
async fn add_note(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<Note>, AppError> {
    let mut store = state.store.write().await;
    let note = store.accounts.add_note(&claims.actor(), &user_id, &req.body)?;
    Ok(Json(note))
}

/// POST /v1/users/{id}/deactivate
async fn deactivate(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserView>, AppError> {
    let mut store = state.store.write().await;
    let user = store.accounts.deactivate(&claims.actor(), &user_id)?;
    Ok(Json(UserView::for_role(user, claims.role)))
}

/// POST /v1/users/{id}/reactivate
async fn reactivate(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserView>, AppError> {
    let mut store = state.store.write().await;
    let user = store.accounts.reactivate(&claims.actor(), &user_id)?;
    Ok(Json(UserView::for_role(user, claims.role)))
}
