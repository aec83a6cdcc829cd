use chrono::NaiveDate;
use concierge_core::{validation, Actor, Permission};
use concierge_shared::ListingKind;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::listing::{Listing, ListingError, ListingStatus, SourceType};
use crate::pricing::billable_days;
use crate::provider::CatalogVilla;

/// Criteria for narrowing the listing table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub kind: Option<ListingKind>,
    pub status: Option<ListingStatus>,
    pub featured: Option<bool>,
    #[serde(rename = "q")]
    pub search: Option<String>,
}

impl ListingFilter {
    fn matches(&self, listing: &Listing) -> bool {
        if self.kind.is_some_and(|k| k != listing.kind()) {
            return false;
        }
        if self.status.is_some_and(|s| s != listing.base().status) {
            return false;
        }
        if self.featured.is_some_and(|f| f != listing.base().featured) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => listing
                .name()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// Partial edit of a listing; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingUpdate {
    pub name: Option<String>,
    pub rate: Option<i64>,
}

/// In-memory listing catalog with blocked-date calendars
pub struct ListingInventory {
    listings: HashMap<Uuid, Listing>,
    /// Provider catalog id -> inventory listing id
    imported: HashMap<String, Uuid>,
}

impl ListingInventory {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
            imported: HashMap::new(),
        }
    }

    /// Load a listing as-is (fixtures). Blocked dates are normalized.
    pub fn insert(&mut self, mut listing: Listing) {
        let base = listing.base_mut();
        normalize_dates(&mut base.blocked_dates);
        normalize_dates(&mut base.synced_blocked_dates);
        self.listings.insert(listing.id(), listing);
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Listing> {
        self.listings.get(id)
    }

    /// Featured first, then by name
    pub fn list(&self, filter: &ListingFilter) -> Vec<&Listing> {
        let mut out: Vec<&Listing> = self.listings.values().filter(|l| filter.matches(l)).collect();
        out.sort_by(|a, b| {
            b.base()
                .featured
                .cmp(&a.base().featured)
                .then_with(|| a.name().cmp(b.name()))
        });
        out
    }

    /// Add a new listing under a freshly assigned id
    pub fn create(&mut self, actor: &Actor, mut listing: Listing) -> Result<Listing, ListingError> {
        actor.require(Permission::AddEditListings)?;
        let name = validation::validate_name(listing.name())?;
        validate_rate(listing.rate())?;

        let base = listing.base_mut();
        base.id = Uuid::new_v4();
        base.name = name;
        normalize_dates(&mut base.blocked_dates);
        normalize_dates(&mut base.synced_blocked_dates);

        tracing::info!(listing_id = %listing.id(), kind = %listing.kind(), actor = %actor.name, "listing created");
        self.listings.insert(listing.id(), listing.clone());
        Ok(listing)
    }

    /// Rename and/or reprice. Every field is checked before anything changes.
    pub fn update(&mut self, actor: &Actor, id: &Uuid, update: &ListingUpdate) -> Result<&Listing, ListingError> {
        actor.require(Permission::AddEditListings)?;
        let name = update.name.as_deref().map(validation::validate_name).transpose()?;
        if let Some(rate) = update.rate {
            validate_rate(rate)?;
        }

        let listing = self.get_mut(id)?;
        if listing.source_type() == SourceType::Api {
            return Err(locked(listing, "details are managed by the partner API"));
        }

        if let Some(name) = name {
            listing.base_mut().name = name;
        }
        if let Some(rate) = update.rate {
            listing.set_rate(rate);
        }
        tracing::info!(listing_id = %id, actor = %actor.name, "listing updated");
        Ok(&*listing)
    }

    /// Only console-managed listings can be deleted
    pub fn delete(&mut self, actor: &Actor, id: &Uuid) -> Result<Listing, ListingError> {
        actor.require(Permission::DeleteListings)?;
        let listing = self.listings.get(id).ok_or(ListingError::NotFound(*id))?;
        if listing.source_type() != SourceType::ShiftFleet {
            return Err(locked(listing, "synced listings cannot be deleted"));
        }

        let removed = self.listings.remove(id).ok_or(ListingError::NotFound(*id))?;
        tracing::info!(listing_id = %id, actor = %actor.name, "listing deleted");
        Ok(removed)
    }

    /// Copy a provider villa into inventory. Each catalog entry imports once.
    pub fn import(&mut self, actor: &Actor, villa: &CatalogVilla) -> Result<Listing, ListingError> {
        actor.require(Permission::AddEditListings)?;
        if self.is_imported(&villa.id) {
            return Err(ListingError::AlreadyImported(villa.id.clone()));
        }
        validate_rate(villa.price_per_night)?;

        let listing = villa.to_listing();
        self.imported.insert(villa.id.clone(), listing.id());
        self.listings.insert(listing.id(), listing.clone());
        tracing::info!(
            listing_id = %listing.id(),
            catalog_id = %villa.id,
            provider = %villa.provider,
            actor = %actor.name,
            "villa imported"
        );
        Ok(listing)
    }

    pub fn is_imported(&self, catalog_id: &str) -> bool {
        self.imported.contains_key(catalog_id)
    }

    /// Flip Active <-> Inactive, returning the new status
    pub fn toggle_status(&mut self, actor: &Actor, id: &Uuid) -> Result<ListingStatus, ListingError> {
        actor.require(Permission::ToggleStatusFeatured)?;
        let base = self.get_mut(id)?.base_mut();
        base.status = match base.status {
            ListingStatus::Active => ListingStatus::Inactive,
            ListingStatus::Inactive => ListingStatus::Active,
        };
        tracing::info!(listing_id = %id, status = ?base.status, actor = %actor.name, "listing status toggled");
        Ok(base.status)
    }

    pub fn toggle_featured(&mut self, actor: &Actor, id: &Uuid) -> Result<bool, ListingError> {
        actor.require(Permission::ToggleStatusFeatured)?;
        let base = self.get_mut(id)?.base_mut();
        base.featured = !base.featured;
        Ok(base.featured)
    }

    pub fn block_dates(
        &mut self,
        actor: &Actor,
        id: &Uuid,
        dates: &[NaiveDate],
    ) -> Result<&[NaiveDate], ListingError> {
        actor.require(Permission::BlockCalendar)?;
        let listing = self.get_mut(id)?;
        check_calendar_edit(listing, dates)?;

        let base = listing.base_mut();
        base.blocked_dates.extend_from_slice(dates);
        normalize_dates(&mut base.blocked_dates);
        Ok(&base.blocked_dates)
    }

    pub fn unblock_dates(
        &mut self,
        actor: &Actor,
        id: &Uuid,
        dates: &[NaiveDate],
    ) -> Result<&[NaiveDate], ListingError> {
        actor.require(Permission::BlockCalendar)?;
        let listing = self.get_mut(id)?;
        check_calendar_edit(listing, dates)?;

        let base = listing.base_mut();
        base.blocked_dates.retain(|d| !dates.contains(d));
        Ok(&base.blocked_dates)
    }

    /// Active and free of blocked dates over `[start, end)`; a same-day range checks `start`.
    pub fn is_available(&self, id: &Uuid, start: NaiveDate, end: NaiveDate) -> Result<bool, ListingError> {
        let listing = self.listings.get(id).ok_or(ListingError::NotFound(*id))?;
        let days = billable_days(start, end)?;
        if !listing.is_active() {
            return Ok(false);
        }

        let blocked = start
            .iter_days()
            .take(days as usize)
            .any(|d| listing.is_blocked_on(d));
        Ok(!blocked)
    }

    fn get_mut(&mut self, id: &Uuid) -> Result<&mut Listing, ListingError> {
        self.listings.get_mut(id).ok_or(ListingError::NotFound(*id))
    }
}

impl Default for ListingInventory {
    fn default() -> Self {
        Self::new()
    }
}

fn locked(listing: &Listing, reason: &'static str) -> ListingError {
    ListingError::SourceLocked {
        id: listing.id(),
        source_type: listing.source_type(),
        reason,
    }
}

/// API calendars are read-only; PMS-synced dates cannot be touched
fn check_calendar_edit(listing: &Listing, dates: &[NaiveDate]) -> Result<(), ListingError> {
    match listing.source_type() {
        SourceType::Api => Err(locked(listing, "calendar is read-only")),
        SourceType::Pms if dates.iter().any(|d| listing.base().synced_blocked_dates.contains(d)) => {
            Err(locked(listing, "synced dates can only change in the PMS"))
        }
        _ => Ok(()),
    }
}

fn validate_rate(rate: i64) -> Result<(), ListingError> {
    if rate <= 0 {
        return Err(ListingError::Invalid(format!("rate must be positive, got {}", rate)));
    }
    Ok(())
}

fn normalize_dates(dates: &mut Vec<NaiveDate>) {
    dates.sort_unstable();
    dates.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::{CoreError, Role};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn car(name: &str) -> Listing {
        serde_json::from_value(serde_json::json!({
            "type": "car",
            "name": name,
            "source": { "partner": "Prestige Motors" },
            "make": "Ferrari",
            "model": "Roma",
            "year": 2023,
            "seats": 4,
            "transmission": "automatic",
            "price_per_day": 1800
        }))
        .unwrap()
    }

    fn owner() -> Actor {
        Actor::new("Olivia", Role::Owner)
    }

    fn admin() -> Actor {
        Actor::new("Ade", Role::Admin)
    }

    fn sourced(name: &str, source_type: SourceType, synced: &[&str]) -> Listing {
        let mut listing = car(name);
        let base = listing.base_mut();
        base.source.source_type = source_type;
        base.synced_blocked_dates = synced.iter().map(|d| date(d)).collect();
        listing
    }

    #[test]
    fn test_create_assigns_id_and_trims_name() {
        let mut inventory = ListingInventory::new();
        let draft = car("  Roma Spider ");
        let draft_id = draft.id();

        let created = inventory.create(&owner(), draft).unwrap();
        assert_ne!(created.id(), draft_id);
        assert_eq!(created.name(), "Roma Spider");
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_name_and_bad_rate() {
        let mut inventory = ListingInventory::new();
        assert!(inventory.create(&owner(), car("  ")).is_err());

        let mut free = car("Free Car");
        free.set_rate(0);
        assert!(matches!(inventory.create(&owner(), free), Err(ListingError::Invalid(_))));
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_only_owner_deletes() {
        let mut inventory = ListingInventory::new();
        let listing = car("Roma");
        let id = listing.id();
        inventory.insert(listing);

        let err = inventory.delete(&admin(), &id).unwrap_err();
        assert!(matches!(err, ListingError::Core(CoreError::PermissionDenied { .. })));

        inventory.delete(&owner(), &id).unwrap();
        assert!(inventory.get(&id).is_none());
    }

    #[test]
    fn test_toggle_status_and_availability() {
        let mut inventory = ListingInventory::new();
        let listing = car("Roma");
        let id = listing.id();
        inventory.insert(listing);

        let (start, end) = (date("2025-06-01"), date("2025-06-04"));
        assert!(inventory.is_available(&id, start, end).unwrap());

        assert_eq!(inventory.toggle_status(&owner(), &id).unwrap(), ListingStatus::Inactive);
        assert!(!inventory.is_available(&id, start, end).unwrap());

        assert_eq!(inventory.toggle_status(&owner(), &id).unwrap(), ListingStatus::Active);
        assert!(inventory.is_available(&id, start, end).unwrap());
    }

    #[test]
    fn test_blocked_dates_are_sorted_and_checked() {
        let mut inventory = ListingInventory::new();
        let listing = car("Roma");
        let id = listing.id();
        inventory.insert(listing);

        let blocked = inventory
            .block_dates(&owner(), &id, &[date("2025-06-03"), date("2025-06-02"), date("2025-06-03")])
            .unwrap()
            .to_vec();
        assert_eq!(blocked, vec![date("2025-06-02"), date("2025-06-03")]);

        assert!(!inventory.is_available(&id, date("2025-06-01"), date("2025-06-04")).unwrap());
        // checkout day is not occupied
        assert!(inventory.is_available(&id, date("2025-05-30"), date("2025-06-02")).unwrap());

        inventory.unblock_dates(&owner(), &id, &[date("2025-06-02"), date("2025-06-03")]).unwrap();
        assert!(inventory.is_available(&id, date("2025-06-01"), date("2025-06-04")).unwrap());
    }

    #[test]
    fn test_viewer_cannot_block_dates() {
        let mut inventory = ListingInventory::new();
        let listing = car("Roma");
        let id = listing.id();
        inventory.insert(listing);

        let viewer = Actor::new("Val", Role::Viewer);
        assert!(inventory.block_dates(&viewer, &id, &[date("2025-06-02")]).is_err());
    }

    #[test]
    fn test_list_filters_and_orders_featured_first() {
        let mut inventory = ListingInventory::new();
        let a = car("Aston");
        let mut z = car("Zonda");
        z.base_mut().featured = true;
        inventory.insert(a);
        inventory.insert(z);

        let all = inventory.list(&ListingFilter::default());
        assert_eq!(all[0].name(), "Zonda");
        assert_eq!(all[1].name(), "Aston");

        let filter = ListingFilter {
            search: Some("ast".to_string()),
            ..Default::default()
        };
        assert_eq!(inventory.list(&filter).len(), 1);

        let villas = ListingFilter {
            kind: Some(ListingKind::Villa),
            ..Default::default()
        };
        assert!(inventory.list(&villas).is_empty());
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut inventory = ListingInventory::new();
        let listing = car("Roma");
        let id = listing.id();
        inventory.insert(listing);

        let bad = ListingUpdate {
            name: Some("Roma Spider".to_string()),
            rate: Some(0),
        };
        assert!(matches!(inventory.update(&admin(), &id, &bad), Err(ListingError::Invalid(_))));
        assert_eq!(inventory.get(&id).unwrap().name(), "Roma");
        assert_eq!(inventory.get(&id).unwrap().rate(), 1800);

        let good = ListingUpdate {
            name: Some(" Roma Spider ".to_string()),
            rate: Some(2100),
        };
        let updated = inventory.update(&admin(), &id, &good).unwrap();
        assert_eq!(updated.name(), "Roma Spider");
        assert_eq!(updated.rate(), 2100);

        let viewer = Actor::new("Val", Role::Viewer);
        assert!(inventory.update(&viewer, &id, &ListingUpdate::default()).is_err());
    }

    #[test]
    fn test_api_listings_are_read_only() {
        let mut inventory = ListingInventory::new();
        let listing = sourced("Partner Coupe", SourceType::Api, &[]);
        let id = listing.id();
        inventory.insert(listing);

        let rename = ListingUpdate {
            name: Some("Mine Now".to_string()),
            rate: None,
        };
        assert!(matches!(
            inventory.update(&owner(), &id, &rename),
            Err(ListingError::SourceLocked { source_type: SourceType::Api, .. })
        ));
        assert!(matches!(
            inventory.block_dates(&owner(), &id, &[date("2025-06-02")]),
            Err(ListingError::SourceLocked { .. })
        ));
        assert!(inventory.get(&id).unwrap().base().blocked_dates.is_empty());

        // status and featured flags stay under console control
        assert!(inventory.toggle_featured(&admin(), &id).unwrap());
    }

    #[test]
    fn test_pms_synced_dates_are_fixed() {
        let mut inventory = ListingInventory::new();
        let listing = sourced("Casa Bianca", SourceType::Pms, &["2025-06-10", "2025-06-11"]);
        let id = listing.id();
        inventory.insert(listing);

        assert!(!inventory.is_available(&id, date("2025-06-09"), date("2025-06-12")).unwrap());
        assert!(matches!(
            inventory.unblock_dates(&admin(), &id, &[date("2025-06-10")]),
            Err(ListingError::SourceLocked { source_type: SourceType::Pms, .. })
        ));

        // other dates on a PMS calendar remain editable
        let blocked = inventory.block_dates(&admin(), &id, &[date("2025-06-20")]).unwrap().to_vec();
        assert_eq!(blocked, vec![date("2025-06-20")]);
        inventory.unblock_dates(&admin(), &id, &[date("2025-06-20")]).unwrap();
    }

    #[test]
    fn test_only_console_listings_are_deleted() {
        let mut inventory = ListingInventory::new();
        let listing = sourced("Casa Bianca", SourceType::Pms, &[]);
        let id = listing.id();
        inventory.insert(listing);

        assert!(matches!(inventory.delete(&owner(), &id), Err(ListingError::SourceLocked { .. })));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_import_tracks_catalog_ids() {
        use crate::provider::{fixtures::villa, Provider};

        let mut inventory = ListingInventory::new();
        let entry = villa("cat-v1", "Villa Serena", Provider::Guesty, "Tulum, Mexico");

        let viewer = Actor::new("Val", Role::Viewer);
        assert!(matches!(
            inventory.import(&viewer, &entry),
            Err(ListingError::Core(CoreError::PermissionDenied { .. }))
        ));
        assert!(!inventory.is_imported("cat-v1"));

        let listing = inventory.import(&admin(), &entry).unwrap();
        assert!(inventory.is_imported("cat-v1"));
        assert_eq!(inventory.get(&listing.id()).unwrap().name(), "Villa Serena");
        assert_eq!(listing.source_type(), SourceType::Pms);

        assert!(matches!(
            inventory.import(&admin(), &entry),
            Err(ListingError::AlreadyImported(id)) if id == "cat-v1"
        ));
        assert_eq!(inventory.len(), 1);
    }
}
