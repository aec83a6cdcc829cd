pub mod app_config;
pub mod fixtures;
pub mod console;

pub use app_config::Config;
pub use console::ConsoleStore;
pub use fixtures::{Fixtures, StoreError};
