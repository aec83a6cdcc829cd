use chrono::{DateTime, NaiveDate, Utc};
use concierge_shared::{ActivityEntry, ActivityKind, ListingKind, Masked, Note};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status;

/// Approval state of a single line item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Pending,
    Approved,
    Declined,
}

/// Aggregate status of a booking, derived from its items and never stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Declined,
    Partial,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

/// One rented asset within a booking request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingItem {
    pub listing_id: Uuid,
    pub listing_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_usd: i64,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub status: ItemStatus,
}

impl BookingItem {
    pub fn new(
        listing_id: Uuid,
        listing_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price_usd: i64,
    ) -> Self {
        Self {
            listing_id,
            listing_name: listing_name.into(),
            start_date,
            end_date,
            price_usd,
            guests: None,
            status: ItemStatus::Pending,
        }
    }
}

/// A customer's request for up to one villa, one car and one yacht
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer: CustomerInfo,
    #[serde(default)]
    pub villa: Option<BookingItem>,
    #[serde(default)]
    pub car: Option<BookingItem>,
    #[serde(default)]
    pub yacht: Option<BookingItem>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
}

impl BookingRequest {
    pub fn new(customer: CustomerInfo) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            customer,
            villa: None,
            car: None,
            yacht: None,
            notes: Vec::new(),
            activity: vec![ActivityEntry::new("system", ActivityKind::Created, "Booking request received")],
        }
    }

    /// Place an item in its slot, replacing whatever was there
    pub fn with_item(mut self, kind: ListingKind, item: BookingItem) -> Self {
        *self.slot_mut(kind) = Some(item);
        self
    }

    pub fn item(&self, kind: ListingKind) -> Option<&BookingItem> {
        match kind {
            ListingKind::Villa => self.villa.as_ref(),
            ListingKind::Car => self.car.as_ref(),
            ListingKind::Yacht => self.yacht.as_ref(),
        }
    }

    pub fn item_mut(&mut self, kind: ListingKind) -> Option<&mut BookingItem> {
        self.slot_mut(kind).as_mut()
    }

    /// Present items in villa, car, yacht order
    pub fn items(&self) -> impl Iterator<Item = (ListingKind, &BookingItem)> + '_ {
        ListingKind::ALL
            .into_iter()
            .filter_map(move |kind| self.item(kind).map(|item| (kind, item)))
    }

    pub fn status(&self) -> BookingStatus {
        status::derive_status(self.items().map(|(_, item)| item.status))
    }

    /// Sum of every item that has not been declined
    pub fn active_total(&self) -> i64 {
        status::active_total(self.items().map(|(_, item)| (item.status, item.price_usd)))
    }

    /// Sum of every present item regardless of status
    pub fn grand_total(&self) -> i64 {
        self.items().map(|(_, item)| item.price_usd).sum()
    }

    pub fn pending_items(&self) -> usize {
        self.items()
            .filter(|(_, item)| item.status == ItemStatus::Pending)
            .count()
    }

    pub(crate) fn record(&mut self, actor: &str, kind: ActivityKind, message: String) {
        self.activity.push(ActivityEntry::new(actor, kind, message));
        self.updated_at = Utc::now();
    }

    fn slot_mut(&mut self, kind: ListingKind) -> &mut Option<BookingItem> {
        match kind {
            ListingKind::Villa => &mut self.villa,
            ListingKind::Car => &mut self.car,
            ListingKind::Yacht => &mut self.yacht,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn customer() -> CustomerInfo {
        CustomerInfo {
            user_id: None,
            name: "James Whitfield".to_string(),
            email: "james@whitfield.com".into(),
            phone: "+1 (305) 555-0142".into(),
        }
    }

    pub fn item(name: &str, price: i64, status: ItemStatus) -> BookingItem {
        let mut item = BookingItem::new(
            Uuid::new_v4(),
            name,
            "2025-07-01".parse().unwrap(),
            "2025-07-05".parse().unwrap(),
            price,
        );
        item.status = status;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_totals() {
        let booking = BookingRequest::new(customer())
            .with_item(ListingKind::Villa, item("Casa Coral", 100, ItemStatus::Approved))
            .with_item(ListingKind::Yacht, item("Sea Breeze", 50, ItemStatus::Declined));

        assert_eq!(booking.active_total(), 100);
        assert_eq!(booking.grand_total(), 150);
        assert_eq!(booking.status(), BookingStatus::Partial);
    }

    #[test]
    fn test_items_in_slot_order() {
        let booking = BookingRequest::new(customer())
            .with_item(ListingKind::Yacht, item("Sea Breeze", 50, ItemStatus::Pending))
            .with_item(ListingKind::Villa, item("Casa Coral", 100, ItemStatus::Pending));

        let kinds: Vec<ListingKind> = booking.items().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ListingKind::Villa, ListingKind::Yacht]);
        assert_eq!(booking.pending_items(), 2);
    }

    #[test]
    fn test_status_is_not_serialized() {
        let booking = BookingRequest::new(customer())
            .with_item(ListingKind::Car, item("Roma", 900, ItemStatus::Approved));
        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("status").is_none());
        assert_eq!(json["car"]["status"], "APPROVED");
    }
}
