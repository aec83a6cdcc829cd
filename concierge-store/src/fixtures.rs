use concierge_accounts::UserProfile;
use concierge_booking::BookingRequest;
use concierge_catalog::{CatalogVilla, Listing};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const LISTINGS_FILE: &str = "listings.json";
const USERS_FILE: &str = "users.json";
const BOOKINGS_FILE: &str = "bookings.json";
const CATALOG_FILE: &str = "catalog.json";

const EMBEDDED_LISTINGS: &str = include_str!("../fixtures/listings.json");
const EMBEDDED_USERS: &str = include_str!("../fixtures/users.json");
const EMBEDDED_BOOKINGS: &str = include_str!("../fixtures/bookings.json");
const EMBEDDED_CATALOG: &str = include_str!("../fixtures/catalog.json");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent fixtures: {0}")]
    Inconsistent(String),
}

/// Mock data set the console runs against
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub listings: Vec<Listing>,
    pub users: Vec<UserProfile>,
    pub bookings: Vec<BookingRequest>,
    /// Provider villas offered for import
    pub catalog: Vec<CatalogVilla>,
}

impl Fixtures {
    /// The data set compiled into the binary
    pub fn embedded() -> Result<Self, StoreError> {
        Self::parse(EMBEDDED_LISTINGS, EMBEDDED_USERS, EMBEDDED_BOOKINGS, EMBEDDED_CATALOG)
    }

    /// Read `listings.json`, `users.json`, `bookings.json` and `catalog.json` from a directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).map_err(|source| StoreError::Io { path, source })
        };

        Self::parse(
            &read(LISTINGS_FILE)?,
            &read(USERS_FILE)?,
            &read(BOOKINGS_FILE)?,
            &read(CATALOG_FILE)?,
        )
    }

    pub fn parse(listings: &str, users: &str, bookings: &str, catalog: &str) -> Result<Self, StoreError> {
        let fixtures = Self {
            listings: parse_file(LISTINGS_FILE, listings)?,
            users: parse_file(USERS_FILE, users)?,
            bookings: parse_file(BOOKINGS_FILE, bookings)?,
            catalog: parse_file(CATALOG_FILE, catalog)?,
        };
        fixtures.check_references()?;

        tracing::debug!(
            listings = fixtures.listings.len(),
            users = fixtures.users.len(),
            bookings = fixtures.bookings.len(),
            catalog = fixtures.catalog.len(),
            "fixtures parsed"
        );
        Ok(fixtures)
    }

    /// Every booked listing and every linked account must exist, and
    /// catalog ids must be unique
    fn check_references(&self) -> Result<(), StoreError> {
        let mut catalog_ids = HashSet::new();
        if let Some(dup) = self.catalog.iter().find(|v| !catalog_ids.insert(v.id.as_str())) {
            return Err(StoreError::Inconsistent(format!("duplicate catalog entry {}", dup.id)));
        }

        let listing_ids: HashSet<_> = self.listings.iter().map(|l| l.id()).collect();
        let user_ids: HashSet<_> = self.users.iter().map(|u| u.id).collect();

        for booking in &self.bookings {
            if let Some(user_id) = booking.customer.user_id {
                if !user_ids.contains(&user_id) {
                    return Err(StoreError::Inconsistent(format!(
                        "booking {} references unknown user {}",
                        booking.id, user_id
                    )));
                }
            }
            for (kind, item) in booking.items() {
                if !listing_ids.contains(&item.listing_id) {
                    return Err(StoreError::Inconsistent(format!(
                        "booking {} {} item references unknown listing {}",
                        booking.id, kind, item.listing_id
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_file<T: DeserializeOwned>(file: &'static str, raw: &str) -> Result<Vec<T>, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Parse { file, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_booking::BookingStatus;
    use concierge_shared::ListingKind;

    #[test]
    fn test_embedded_fixtures_load() {
        let fixtures = Fixtures::embedded().unwrap();
        assert_eq!(fixtures.listings.len(), 6);
        assert_eq!(fixtures.users.len(), 4);
        assert_eq!(fixtures.bookings.len(), 5);
        assert_eq!(fixtures.catalog.len(), 6);

        let kinds: HashSet<ListingKind> = fixtures.listings.iter().map(|l| l.kind()).collect();
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_embedded_bookings_cover_every_status() {
        let fixtures = Fixtures::embedded().unwrap();
        let statuses: Vec<BookingStatus> = fixtures.bookings.iter().map(|b| b.status()).collect();

        for wanted in [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Declined,
            BookingStatus::Partial,
        ] {
            assert!(statuses.contains(&wanted), "no fixture booking is {:?}", wanted);
        }
    }

    #[test]
    fn test_dangling_listing_is_rejected() {
        let bookings = r#"[{
            "id": "33333333-3333-4333-8333-000000000099",
            "created_at": "2025-05-01T10:00:00Z",
            "updated_at": "2025-05-01T10:00:00Z",
            "customer": { "name": "Ghost", "email": "g@example.com", "phone": "0000" },
            "car": {
                "listing_id": "22222222-2222-4222-8222-000000000099",
                "listing_name": "Missing",
                "start_date": "2025-06-01",
                "end_date": "2025-06-02",
                "price_usd": 100
            }
        }]"#;

        let err = Fixtures::parse("[]", "[]", bookings, "[]").unwrap_err();
        assert!(matches!(err, StoreError::Inconsistent(_)));
    }

    #[test]
    fn test_embedded_listings_cover_every_source() {
        use concierge_catalog::SourceType;

        let fixtures = Fixtures::embedded().unwrap();
        let sources: HashSet<SourceType> = fixtures.listings.iter().map(|l| l.source_type()).collect();
        assert_eq!(sources.len(), 3);

        let synced = fixtures
            .listings
            .iter()
            .find(|l| l.source_type() == SourceType::Pms)
            .unwrap();
        assert!(!synced.base().synced_blocked_dates.is_empty());
        assert!(synced.base().last_synced.is_some());
    }

    #[test]
    fn test_duplicate_catalog_entry_is_rejected() {
        let entry = r#"{ "id": "cat-v1", "name": "Villa Serena", "provider": "Guesty", "location": "Tulum, Mexico",
            "price_per_night": 650, "bedrooms": 3, "bathrooms": 2, "max_guests": 6 }"#;
        let catalog = format!("[{}, {}]", entry, entry);

        let err = Fixtures::parse("[]", "[]", "[]", &catalog).unwrap_err();
        assert!(err.to_string().contains("cat-v1"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Fixtures::parse("[]", "{", "[]", "[]").unwrap_err();
        assert!(err.to_string().contains(USERS_FILE));
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let err = Fixtures::from_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
