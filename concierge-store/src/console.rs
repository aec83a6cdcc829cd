use concierge_accounts::AccountDirectory;
use concierge_booking::BookingManager;
use concierge_catalog::{ListingInventory, ProviderCatalog};

use crate::app_config::{Config, ConsoleRules};
use crate::fixtures::{Fixtures, StoreError};

/// Everything the console operates on, held in memory
pub struct ConsoleStore {
    pub bookings: BookingManager,
    pub listings: ListingInventory,
    pub accounts: AccountDirectory,
    pub catalog: ProviderCatalog,
}

impl ConsoleStore {
    pub fn empty(rules: &ConsoleRules) -> Self {
        Self {
            bookings: BookingManager::new().with_note_limit(rules.max_note_chars),
            listings: ListingInventory::new(),
            accounts: AccountDirectory::new().with_note_limit(rules.max_note_chars),
            catalog: ProviderCatalog::default(),
        }
    }

    pub fn from_fixtures(fixtures: Fixtures, rules: &ConsoleRules) -> Self {
        let mut store = Self::empty(rules);
        store.catalog = ProviderCatalog::new(fixtures.catalog);
        for listing in fixtures.listings {
            store.listings.insert(listing);
        }
        for user in fixtures.users {
            store.accounts.insert(user);
        }
        for booking in fixtures.bookings {
            store.bookings.insert(booking);
        }
        store
    }

    /// Build the store from the configured fixture source
    pub fn load(config: &Config) -> Result<Self, StoreError> {
        let fixtures = match &config.fixtures.dir {
            Some(dir) => {
                tracing::info!(dir = %dir, "loading fixtures from directory");
                Fixtures::from_dir(dir)?
            }
            None => Fixtures::embedded()?,
        };

        let store = Self::from_fixtures(fixtures, &config.rules);
        tracing::info!(
            listings = store.listings.len(),
            users = store.accounts.len(),
            bookings = store.bookings.len(),
            catalog = store.catalog.len(),
            "console store ready"
        );
        Ok(store)
    }
}
