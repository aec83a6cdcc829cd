pub mod models;
pub mod status;
pub mod manager;
pub mod view;
pub mod summary;

pub use models::{BookingItem, BookingRequest, BookingStatus, CustomerInfo, ItemStatus};
pub use status::{active_total, derive_status};
pub use manager::{BookingError, BookingFilter, BookingManager};
pub use view::BookingView;
pub use summary::BookingSummary;
