use serde::{Deserialize, Serialize};
use std::fmt;

use crate::listing::{Listing, ListingBase, ListingSource, SourceType, Villa};

/// Property management systems villas can be imported from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Provider {
    Guesty,
    Hostaway,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Guesty => "Guesty",
            Provider::Hostaway => "Hostaway",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A villa offered by a connected provider, not yet in inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogVilla {
    /// Provider-side identifier, e.g. `cat-v1`
    pub id: String,
    pub name: String,
    pub provider: Provider,
    pub location: String,
    pub price_per_night: i64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_guests: u32,
    #[serde(default)]
    pub photo: Option<String>,
}

impl CatalogVilla {
    /// Inventory listing for this villa. Imported villas stay PMS-managed.
    pub fn to_listing(&self) -> Listing {
        Listing::Villa(Villa {
            base: ListingBase {
                id: uuid::Uuid::new_v4(),
                name: self.name.clone(),
                photos: self.photo.iter().cloned().collect(),
                source: ListingSource {
                    source_type: SourceType::Pms,
                    partner: Some(self.provider.to_string()),
                    url: None,
                },
                status: Default::default(),
                featured: false,
                blocked_dates: Vec::new(),
                synced_blocked_dates: Vec::new(),
                last_synced: None,
            },
            location: self.location.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            max_guests: self.max_guests,
            price_per_night: self.price_per_night,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    /// Matches name or location
    #[serde(rename = "q")]
    pub search: Option<String>,
    pub provider: Option<Provider>,
    /// Matches against the location, e.g. "Bali"
    pub market: Option<String>,
}

impl CatalogFilter {
    fn matches(&self, villa: &CatalogVilla) -> bool {
        let name = villa.name.to_lowercase();
        let location = villa.location.to_lowercase();

        if let Some(q) = non_blank(&self.search) {
            if !name.contains(&q) && !location.contains(&q) {
                return false;
            }
        }
        if self.provider.is_some_and(|p| p != villa.provider) {
            return false;
        }
        match non_blank(&self.market) {
            Some(market) => location.contains(&market),
            None => true,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Read-only catalog of villas available for import
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    villas: Vec<CatalogVilla>,
}

impl ProviderCatalog {
    pub fn new(villas: Vec<CatalogVilla>) -> Self {
        Self { villas }
    }

    pub fn len(&self) -> usize {
        self.villas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.villas.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogVilla> {
        self.villas.iter().find(|v| v.id == id)
    }

    /// Catalog order is preserved
    pub fn list(&self, filter: &CatalogFilter) -> Vec<&CatalogVilla> {
        self.villas.iter().filter(|v| filter.matches(v)).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn villa(id: &str, name: &str, provider: Provider, location: &str) -> CatalogVilla {
        CatalogVilla {
            id: id.to_string(),
            name: name.to_string(),
            provider,
            location: location.to_string(),
            price_per_night: 650,
            bedrooms: 3,
            bathrooms: 2,
            max_guests: 6,
            photo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::villa;
    use super::*;
    use concierge_shared::ListingKind;

    fn catalog() -> ProviderCatalog {
        ProviderCatalog::new(vec![
            villa("cat-v1", "Villa Serena", Provider::Guesty, "Tulum, Mexico"),
            villa("cat-v2", "Casa del Mare", Provider::Hostaway, "Amalfi Coast, Italy"),
            villa("cat-v3", "The Lake House", Provider::Guesty, "Lake Como, Italy"),
        ])
    }

    #[test]
    fn test_search_matches_name_or_location() {
        let catalog = catalog();
        let by_name = CatalogFilter {
            search: Some("serena".to_string()),
            ..Default::default()
        };
        assert_eq!(catalog.list(&by_name).len(), 1);

        let by_location = CatalogFilter {
            search: Some("ITALY".to_string()),
            ..Default::default()
        };
        let ids: Vec<&str> = catalog.list(&by_location).iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["cat-v2", "cat-v3"]);
    }

    #[test]
    fn test_provider_and_market_filters_combine() {
        let catalog = catalog();
        let filter = CatalogFilter {
            provider: Some(Provider::Guesty),
            market: Some("lake como".to_string()),
            ..Default::default()
        };
        let found = catalog.list(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "The Lake House");

        let blank = CatalogFilter {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(catalog.list(&blank).len(), 3);
        assert!(catalog.get("cat-v9").is_none());
    }

    #[test]
    fn test_imported_villa_is_pms_managed() {
        let entry = villa("cat-v1", "Villa Serena", Provider::Guesty, "Tulum, Mexico");
        let listing = entry.to_listing();

        assert_eq!(listing.kind(), ListingKind::Villa);
        assert_eq!(listing.source_type(), SourceType::Pms);
        assert_eq!(listing.base().source.partner.as_deref(), Some("Guesty"));
        assert_eq!(listing.rate(), 650);
        assert!(listing.is_active());
    }

    #[test]
    fn test_provider_names_on_the_wire() {
        let entry: CatalogVilla = serde_json::from_value(serde_json::json!({
            "id": "cat-v4",
            "name": "Palm Grove Estate",
            "provider": "Hostaway",
            "location": "Bali, Indonesia",
            "price_per_night": 450,
            "bedrooms": 4,
            "bathrooms": 4,
            "max_guests": 10
        }))
        .unwrap();
        assert_eq!(entry.provider, Provider::Hostaway);
        assert_eq!(entry.photo, None);
    }
}
