use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use concierge_catalog::{
    quote, CatalogFilter, CatalogVilla, Listing, ListingError, ListingFilter, ListingStatus,
    ListingUpdate, Quote,
};
use concierge_core::Permission;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, middleware::ConsoleClaims, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BlockedDatesRequest {
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct BlockedDatesResponse {
    pub listing_id: Uuid,
    pub blocked_dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub listing_id: Uuid,
    pub status: ListingStatus,
}

#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    pub listing_id: Uuid,
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hours: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub listing_id: Uuid,
    pub available: bool,
    /// Absent when the listing cannot be priced for the request (hourly without hours)
    pub quote: Option<Quote>,
}

/// Provider villa plus whether it is already in inventory
#[derive(Debug, Serialize)]
pub struct CatalogEntryResponse {
    #[serde(flatten)]
    pub villa: CatalogVilla,
    pub imported: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/listings", get(list_listings).post(create_listing))
        .route(
            "/v1/listings/{id}",
            get(get_listing).patch(update_listing).delete(delete_listing),
        )
        .route("/v1/listings/{id}/toggle-status", post(toggle_status))
        .route("/v1/listings/{id}/toggle-featured", post(toggle_featured))
        .route(
            "/v1/listings/{id}/blocked-dates",
            post(block_dates).delete(unblock_dates),
        )
        .route("/v1/listings/{id}/availability", get(availability))
        .route("/v1/catalog", get(list_catalog))
        .route("/v1/catalog/{id}/import", post(import_villa))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/listings?kind=&status=&featured=&q=
async fn list_listings(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Query(filter): Query<ListingFilter>,
) -> Result<Json<Vec<Listing>>, AppError> {
    claims.actor().require(Permission::ViewInventory)?;
    let store = state.store.read().await;
    Ok(Json(store.listings.list(&filter).into_iter().cloned().collect()))
}

/// GET /v1/listings/{id}
async fn get_listing(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Listing>, AppError> {
    claims.actor().require(Permission::ViewInventory)?;
    let store = state.store.read().await;
    store
        .listings
        .get(&listing_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Listing not found: {}", listing_id)))
}

/// POST /v1/listings
async fn create_listing(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Json(listing): Json<Listing>,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    let mut store = state.store.write().await;
    let created = store.listings.create(&claims.actor(), listing)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /v1/listings/{id}
async fn update_listing(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
    Json(update): Json<ListingUpdate>,
) -> Result<Json<Listing>, AppError> {
    let mut store = state.store.write().await;
    let listing = store.listings.update(&claims.actor(), &listing_id, &update)?;
    Ok(Json(listing.clone()))
}

/// DELETE /v1/listings/{id}
async fn delete_listing(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.write().await;
    store.listings.delete(&claims.actor(), &listing_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/listings/{id}/toggle-status
async fn toggle_status(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    let mut store = state.store.write().await;
    let status = store.listings.toggle_status(&claims.actor(), &listing_id)?;
    Ok(Json(StatusResponse { listing_id, status }))
}

/// POST /v1/listings/{id}/toggle-featured
async fn toggle_featured(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<FeaturedResponse>, AppError> {
    let mut store = state.store.write().await;
    let featured = store.listings.toggle_featured(&claims.actor(), &listing_id)?;
    Ok(Json(FeaturedResponse { listing_id, featured }))
}

/// POST /v1/listings/{id}/blocked-dates
async fn block_dates(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
    Json(req): Json<BlockedDatesRequest>,
) -> Result<Json<BlockedDatesResponse>, AppError> {
    let mut store = state.store.write().await;
    let blocked_dates = store
        .listings
        .block_dates(&claims.actor(), &listing_id, &req.dates)?
        .to_vec();
    Ok(Json(BlockedDatesResponse { listing_id, blocked_dates }))
}

/// DELETE /v1/listings/{id}/blocked-dates
async fn unblock_dates(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
    Json(req): Json<BlockedDatesRequest>,
) -> Result<Json<BlockedDatesResponse>, AppError> {
    let mut store = state.store.write().await;
    let blocked_dates = store
        .listings
        .unblock_dates(&claims.actor(), &listing_id, &req.dates)?
        .to_vec();
    Ok(Json(BlockedDatesResponse { listing_id, blocked_dates }))
}

/// GET /v1/listings/{id}/availability?start=&end=&hours=
async fn availability(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(listing_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    claims.actor().require(Permission::ViewInventory)?;
    let store = state.store.read().await;

    let available = store.listings.is_available(&listing_id, query.start, query.end)?;
    let price = store
        .listings
        .get(&listing_id)
        .and_then(|listing| quote(listing, query.start, query.end, query.hours).ok());

    Ok(Json(AvailabilityResponse {
        listing_id,
        available,
        quote: price,
    }))
}

/// GET /v1/catalog?q=&provider=&market=
async fn list_catalog(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Query(filter): Query<CatalogFilter>,
) -> Result<Json<Vec<CatalogEntryResponse>>, AppError> {
    claims.actor().require(Permission::AddEditListings)?;
    let store = state.store.read().await;

    let entries = store
        .catalog
        .list(&filter)
        .into_iter()
        .map(|villa| CatalogEntryResponse {
            imported: store.listings.is_imported(&villa.id),
            villa: villa.clone(),
        })
        .collect();
    Ok(Json(entries))
}

/// POST /v1/catalog/{id}/import
async fn import_villa(
    State(state): State<AppState>,
    Extension(claims): Extension<ConsoleClaims>,
    Path(catalog_id): Path<String>,
) -> Result<(StatusCode, Json<Listing>), AppError> {
    let mut store = state.store.write().await;
    let villa = store
        .catalog
        .get(&catalog_id)
        .cloned()
        .ok_or(ListingError::CatalogEntryNotFound(catalog_id))?;

    let listing = store.listings.import(&claims.actor(), &villa)?;
    Ok((StatusCode::CREATED, Json(listing)))
}
