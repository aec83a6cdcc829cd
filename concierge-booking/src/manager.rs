use concierge_core::{validation, Actor, CoreError, Permission};
use concierge_shared::{ActivityKind, ListingKind, Note};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{BookingRequest, BookingStatus, ItemStatus};

pub const DEFAULT_MAX_NOTE_CHARS: usize = 2000;

/// Criteria for the booking triage table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    #[serde(rename = "q")]
    pub search: Option<String>,
}

impl BookingFilter {
    fn matches(&self, booking: &BookingRequest) -> bool {
        if self.status.is_some_and(|s| s != booking.status()) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                booking.customer.name.to_lowercase().contains(&needle)
                    || booking.customer.email.expose().to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// Holds booking requests and applies triage decisions to them
pub struct BookingManager {
    bookings: HashMap<Uuid, BookingRequest>,
    max_note_chars: usize,
}

impl BookingManager {
    pub fn new() -> Self {
        Self {
            bookings: HashMap::new(),
            max_note_chars: DEFAULT_MAX_NOTE_CHARS,
        }
    }

    pub fn with_note_limit(mut self, max_note_chars: usize) -> Self {
        self.max_note_chars = max_note_chars;
        self
    }

    pub fn insert(&mut self, booking: BookingRequest) {
        self.bookings.insert(booking.id, booking);
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn get(&self, booking_id: &Uuid) -> Option<&BookingRequest> {
        self.bookings.get(booking_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookingRequest> {
        self.bookings.values()
    }

    /// Newest first
    pub fn list(&self, filter: &BookingFilter) -> Vec<&BookingRequest> {
        let mut out: Vec<&BookingRequest> = self.bookings.values().filter(|b| filter.matches(b)).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn approve_item(
        &mut self,
        booking_id: &Uuid,
        kind: ListingKind,
        actor: &Actor,
    ) -> Result<&BookingRequest, BookingError> {
        actor.require(Permission::ApproveDeclineItems)?;
        self.set_item_status(booking_id, kind, actor, ItemStatus::Approved)
    }

    pub fn decline_item(
        &mut self,
        booking_id: &Uuid,
        kind: ListingKind,
        actor: &Actor,
    ) -> Result<&BookingRequest, BookingError> {
        actor.require(Permission::ApproveDeclineItems)?;
        self.set_item_status(booking_id, kind, actor, ItemStatus::Declined)
    }

    /// Return an item to Pending
    pub fn reset_item(
        &mut self,
        booking_id: &Uuid,
        kind: ListingKind,
        actor: &Actor,
    ) -> Result<&BookingRequest, BookingError> {
        actor.require(Permission::ApproveDeclineItems)?;
        self.set_item_status(booking_id, kind, actor, ItemStatus::Pending)
    }

    /// Approve every item still pending; decided items are left alone
    pub fn approve_all(&mut self, booking_id: &Uuid, actor: &Actor) -> Result<&BookingRequest, BookingError> {
        actor.require(Permission::ApproveDeclineItems)?;
        self.decide_pending(booking_id, actor, ItemStatus::Approved)
    }

    pub fn decline_all(&mut self, booking_id: &Uuid, actor: &Actor) -> Result<&BookingRequest, BookingError> {
        actor.require(Permission::ApproveDeclineItems)?;
        self.decide_pending(booking_id, actor, ItemStatus::Declined)
    }

    pub fn add_note(&mut self, booking_id: &Uuid, actor: &Actor, body: &str) -> Result<Note, BookingError> {
        actor.require(Permission::AddNotes)?;
        let body = validation::validate_note(body, self.max_note_chars)?;
        let booking = self.get_booking_mut(booking_id)?;

        let note = Note::new(&actor.name, body);
        booking.notes.push(note.clone());
        booking.record(&actor.name, ActivityKind::NoteAdded, "Added a note".to_string());
        tracing::info!(booking_id = %booking_id, actor = %actor.name, "booking note added");

        Ok(note)
    }

    fn set_item_status(
        &mut self,
        booking_id: &Uuid,
        kind: ListingKind,
        actor: &Actor,
        target: ItemStatus,
    ) -> Result<&BookingRequest, BookingError> {
        let booking = self.get_booking_mut(booking_id)?;
        let item = booking.item_mut(kind).ok_or(BookingError::ItemNotFound {
            booking_id: *booking_id,
            kind,
        })?;

        if item.status != target {
            item.status = target;
            let message = format!("{} {}: {}", verb(target), kind, item.listing_name);
            booking.record(&actor.name, activity_kind(target), message);
            tracing::info!(
                booking_id = %booking_id,
                item = %kind,
                status = ?target,
                derived = ?booking.status(),
                actor = %actor.name,
                "booking item updated"
            );
        }

        Ok(&*booking)
    }

    fn decide_pending(
        &mut self,
        booking_id: &Uuid,
        actor: &Actor,
        target: ItemStatus,
    ) -> Result<&BookingRequest, BookingError> {
        let booking = self.get_booking_mut(booking_id)?;

        for kind in ListingKind::ALL {
            let Some(item) = booking.item_mut(kind) else {
                continue;
            };
            if item.status != ItemStatus::Pending {
                continue;
            }
            item.status = target;
            let message = format!("{} {}: {}", verb(target), kind, item.listing_name);
            booking.record(&actor.name, activity_kind(target), message);
        }

        tracing::info!(booking_id = %booking_id, derived = ?booking.status(), actor = %actor.name, "pending items decided");
        Ok(&*booking)
    }

    fn get_booking_mut(&mut self, booking_id: &Uuid) -> Result<&mut BookingRequest, BookingError> {
        self.bookings
            .get_mut(booking_id)
            .ok_or(BookingError::NotFound(*booking_id))
    }
}

impl Default for BookingManager {
    fn default() -> Self {
        Self::new()
    }
}

fn verb(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Pending => "Reset",
        ItemStatus::Approved => "Approved",
        ItemStatus::Declined => "Declined",
    }
}

fn activity_kind(status: ItemStatus) -> ActivityKind {
    match status {
        ItemStatus::Pending => ActivityKind::ItemReset,
        ItemStatus::Approved => ActivityKind::ItemApproved,
        ItemStatus::Declined => ActivityKind::ItemDeclined,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Booking {booking_id} has no {kind} item")]
    ItemNotFound {
        booking_id: Uuid,
        kind: ListingKind,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
