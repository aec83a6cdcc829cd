pub mod pii;
pub mod models;

pub use models::{ActivityEntry, ActivityKind, ListingKind, Note};
pub use pii::{mask_email, mask_phone, Masked};
