pub mod activity;
pub mod kind;

pub use activity::{ActivityEntry, ActivityKind, Note};
pub use kind::ListingKind;
