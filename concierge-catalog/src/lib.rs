pub mod listing;
pub mod pricing;
pub mod inventory;
pub mod provider;

pub use listing::{
    Car, Listing, ListingBase, ListingError, ListingSource, ListingStatus, PricingUnit,
    SourceType, Transmission, Villa, Yacht,
};
pub use pricing::{quote, Quote};
pub use inventory::{ListingFilter, ListingInventory, ListingUpdate};
pub use provider::{CatalogFilter, CatalogVilla, Provider, ProviderCatalog};
