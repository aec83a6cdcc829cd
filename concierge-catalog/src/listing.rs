use chrono::{DateTime, NaiveDate, Utc};
use concierge_core::CoreError;
use concierge_shared::ListingKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
}

/// Unit a listing's rate is charged in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PricingUnit {
    Night,
    Day,
    Hour,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

/// Who owns a listing's data and calendar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Managed in the console
    #[default]
    ShiftFleet,
    /// Synced from a property management system; synced dates are fixed
    Pms,
    /// Mirrored from a partner API; read-only
    Api,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::ShiftFleet => "shift_fleet",
            SourceType::Pms => "pms",
            SourceType::Api => "api",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ListingSource {
    #[serde(rename = "type", default)]
    pub source_type: SourceType,
    /// Partner or provider name, e.g. "Guesty"
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Fields every listing carries regardless of type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingBase {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub source: ListingSource,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub featured: bool,
    /// Dates blocked from the console
    #[serde(default)]
    pub blocked_dates: Vec<NaiveDate>,
    /// Dates blocked upstream by the source system
    #[serde(default)]
    pub synced_blocked_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub last_synced: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Villa {
    #[serde(flatten)]
    pub base: ListingBase,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_guests: u32,
    pub price_per_night: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    #[serde(flatten)]
    pub base: ListingBase,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub seats: u32,
    pub transmission: Transmission,
    pub price_per_day: i64,
}

/// Yachts charter either by the day or by the hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Yacht {
    #[serde(flatten)]
    pub base: ListingBase,
    pub length_ft: u32,
    pub cabins: u32,
    pub max_guests: u32,
    pub crew: u32,
    pub pricing_unit: PricingUnit,
    pub rate: i64,
}

/// A rentable asset, tagged by `type` on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Listing {
    Villa(Villa),
    Car(Car),
    Yacht(Yacht),
}

impl Listing {
    pub fn base(&self) -> &ListingBase {
        match self {
            Listing::Villa(v) => &v.base,
            Listing::Car(c) => &c.base,
            Listing::Yacht(y) => &y.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ListingBase {
        match self {
            Listing::Villa(v) => &mut v.base,
            Listing::Car(c) => &mut c.base,
            Listing::Yacht(y) => &mut y.base,
        }
    }

    pub fn id(&self) -> Uuid {
        self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn kind(&self) -> ListingKind {
        match self {
            Listing::Villa(_) => ListingKind::Villa,
            Listing::Car(_) => ListingKind::Car,
            Listing::Yacht(_) => ListingKind::Yacht,
        }
    }

    pub fn is_active(&self) -> bool {
        self.base().status == ListingStatus::Active
    }

    pub fn pricing_unit(&self) -> PricingUnit {
        match self {
            Listing::Villa(_) => PricingUnit::Night,
            Listing::Car(_) => PricingUnit::Day,
            Listing::Yacht(y) => y.pricing_unit,
        }
    }

    /// Rate in whole USD per pricing unit
    pub fn rate(&self) -> i64 {
        match self {
            Listing::Villa(v) => v.price_per_night,
            Listing::Car(c) => c.price_per_day,
            Listing::Yacht(y) => y.rate,
        }
    }

    pub fn set_rate(&mut self, rate: i64) {
        match self {
            Listing::Villa(v) => v.price_per_night = rate,
            Listing::Car(c) => c.price_per_day = rate,
            Listing::Yacht(y) => y.rate = rate,
        }
    }

    /// Guest capacity; cars report seats
    pub fn capacity(&self) -> u32 {
        match self {
            Listing::Villa(v) => v.max_guests,
            Listing::Car(c) => c.seats,
            Listing::Yacht(y) => y.max_guests,
        }
    }

    pub fn source_type(&self) -> SourceType {
        self.base().source.source_type
    }

    /// Blocked either locally or by the source system
    pub fn is_blocked_on(&self, date: NaiveDate) -> bool {
        let base = self.base();
        base.blocked_dates.binary_search(&date).is_ok()
            || base.synced_blocked_dates.binary_search(&date).is_ok()
    }
}

/// Listing-related errors
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Listing not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid listing: {0}")]
    Invalid(String),

    #[error("Invalid date range: {start} to {end}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Listing {id} is managed by its {source_type} source: {reason}")]
    SourceLocked {
        id: Uuid,
        source_type: SourceType,
        reason: &'static str,
    },

    #[error("Catalog entry not found: {0}")]
    CatalogEntryNotFound(String),

    #[error("Catalog entry {0} is already in inventory")]
    AlreadyImported(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
