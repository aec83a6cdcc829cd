use serde::Serialize;

use crate::models::{BookingRequest, BookingStatus};

/// Dashboard counters across all bookings. Money figures are shown to
/// every role that may see bookings, the same as the per-booking totals.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BookingSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub declined: usize,
    pub partial: usize,
    pub completed: usize,
    pub pending_items: usize,
    /// Active totals of Approved and Partial bookings
    pub active_revenue: i64,
}

impl BookingSummary {
    pub fn build<'a, I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = &'a BookingRequest>,
    {
        let mut summary = BookingSummary::default();

        for booking in bookings {
            summary.total += 1;
            summary.pending_items += booking.pending_items();

            let status = booking.status();
            match status {
                BookingStatus::Pending => summary.pending += 1,
                BookingStatus::Approved => summary.approved += 1,
                BookingStatus::Declined => summary.declined += 1,
                BookingStatus::Partial => summary.partial += 1,
                BookingStatus::Completed => summary.completed += 1,
            }

            if matches!(status, BookingStatus::Approved | BookingStatus::Partial) {
                summary.active_revenue += booking.active_total();
            }
        }
        summary
    }
}
