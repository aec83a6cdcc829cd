pub mod profile;
pub mod directory;
pub mod view;

pub use profile::{AccountStats, AccountStatus, UserProfile};
pub use directory::{AccountDirectory, AccountError, ContactUpdate};
pub use view::UserView;
