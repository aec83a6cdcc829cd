use chrono::{DateTime, NaiveDate, Utc};
use concierge_core::visibility::{display_email, display_phone};
use concierge_core::Role;
use concierge_shared::{ActivityEntry, ListingKind, Note};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{BookingRequest, BookingStatus, ItemStatus};

#[derive(Debug, Clone, Serialize)]
pub struct CustomerView {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub kind: ListingKind,
    pub listing_id: Uuid,
    pub listing_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_usd: i64,
    pub guests: Option<u32>,
    pub status: ItemStatus,
}

/// Read model of a booking as a given role sees it: status and totals
/// computed, customer contact masked unless the role may view PII.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer: CustomerView,
    pub items: Vec<ItemView>,
    pub status: BookingStatus,
    pub active_total: i64,
    pub grand_total: i64,
    pub notes: Vec<Note>,
    pub activity: Vec<ActivityEntry>,
}

impl BookingView {
    pub fn for_role(booking: &BookingRequest, role: Role) -> Self {
        let customer = &booking.customer;
        Self {
            id: booking.id,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            customer: CustomerView {
                user_id: customer.user_id,
                name: customer.name.clone(),
                email: display_email(role, customer.email.expose()),
                phone: display_phone(role, customer.phone.expose()),
            },
            items: booking
                .items()
                .map(|(kind, item)| ItemView {
                    kind,
                    listing_id: item.listing_id,
                    listing_name: item.listing_name.clone(),
                    start_date: item.start_date,
                    end_date: item.end_date,
                    price_usd: item.price_usd,
                    guests: item.guests,
                    status: item.status,
                })
                .collect(),
            status: booking.status(),
            active_total: booking.active_total(),
            grand_total: booking.grand_total(),
            notes: booking.notes.clone(),
            activity: booking.activity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{customer, item};

    #[test]
    fn test_viewer_sees_masked_contact() {
        let booking = BookingRequest::new(customer())
            .with_item(ListingKind::Villa, item("Casa Coral", 100, ItemStatus::Approved))
            .with_item(ListingKind::Car, item("Roma", 50, ItemStatus::Declined));

        let view = BookingView::for_role(&booking, Role::Viewer);
        assert_eq!(view.customer.email, "j***@whitfield.com");
        assert_eq!(view.customer.phone, "***-0142");
        assert_eq!(view.status, BookingStatus::Partial);
        assert_eq!(view.active_total, 100);
        assert_eq!(view.grand_total, 150);
        assert_eq!(view.items.len(), 2);

        let view = BookingView::for_role(&booking, Role::Owner);
        assert_eq!(view.customer.email, "james@whitfield.com");
    }
}
