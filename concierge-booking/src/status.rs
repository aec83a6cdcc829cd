use crate::models::{BookingStatus, ItemStatus};

/// Combine the statuses of the present items into one booking status.
///
/// First match wins: no items is Pending, then all Approved, all Declined,
/// all Pending, and anything mixed is Partial. `Completed` is never derived.
pub fn derive_status<I>(statuses: I) -> BookingStatus
where
    I: IntoIterator<Item = ItemStatus>,
{
    let statuses: Vec<ItemStatus> = statuses.into_iter().collect();
    let all = |wanted: ItemStatus| statuses.iter().all(|s| *s == wanted);

    if statuses.is_empty() {
        BookingStatus::Pending
    } else if all(ItemStatus::Approved) {
        BookingStatus::Approved
    } else if all(ItemStatus::Declined) {
        BookingStatus::Declined
    } else if all(ItemStatus::Pending) {
        BookingStatus::Pending
    } else {
        BookingStatus::Partial
    }
}

/// Sum the price of every item that has not been declined
pub fn active_total<I>(items: I) -> i64
where
    I: IntoIterator<Item = (ItemStatus, i64)>,
{
    items
        .into_iter()
        .filter(|(status, _)| *status != ItemStatus::Declined)
        .map(|(_, price)| price)
        .sum()
}
