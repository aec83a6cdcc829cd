use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Listing, ListingError, PricingUnit};

/// Price estimate for renting a listing over a period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub listing_id: Uuid,
    pub unit: PricingUnit,
    pub units: i64,
    pub rate: i64,
    pub total: i64,
}

/// Number of nights/days between two dates, never less than one.
pub fn billable_days(start: NaiveDate, end: NaiveDate) -> Result<i64, ListingError> {
    if end < start {
        return Err(ListingError::InvalidRange { start, end });
    }
    Ok((end - start).num_days().max(1))
}

/// Quote a rental. Hourly listings need `hours`; the dates still have to form a valid range.
pub fn quote(
    listing: &Listing,
    start: NaiveDate,
    end: NaiveDate,
    hours: Option<u32>,
) -> Result<Quote, ListingError> {
    let days = billable_days(start, end)?;
    let unit = listing.pricing_unit();

    let units = match unit {
        PricingUnit::Night | PricingUnit::Day => days,
        PricingUnit::Hour => match hours {
            Some(h) if h > 0 => i64::from(h),
            _ => {
                return Err(ListingError::Invalid(format!(
                    "{} is charged hourly, hours are required",
                    listing.name()
                )))
            }
        },
    };

    let rate = listing.rate();
    Ok(Quote {
        listing_id: listing.id(),
        unit,
        units,
        rate,
        total: rate * units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn villa() -> Listing {
        serde_json::from_value(serde_json::json!({
            "type": "villa",
            "name": "Casa Coral",
            "source": { "partner": "Direct" },
            "location": "Tulum",
            "bedrooms": 5,
            "bathrooms": 4,
            "max_guests": 10,
            "price_per_night": 2500
        }))
        .unwrap()
    }

    #[test]
    fn test_nightly_quote() {
        let q = quote(&villa(), date("2025-03-01"), date("2025-03-05"), None).unwrap();
        assert_eq!(q.units, 4);
        assert_eq!(q.total, 10000);
        assert_eq!(q.unit, PricingUnit::Night);
    }

    #[test]
    fn test_same_day_bills_one_unit() {
        let q = quote(&villa(), date("2025-03-01"), date("2025-03-01"), None).unwrap();
        assert_eq!(q.units, 1);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = quote(&villa(), date("2025-03-05"), date("2025-03-01"), None).unwrap_err();
        assert!(matches!(err, ListingError::InvalidRange { .. }));
    }

    #[test]
    fn test_hourly_yacht_requires_hours() {
        let yacht: Listing = serde_json::from_value(serde_json::json!({
            "type": "yacht",
            "name": "Sea Breeze",
            "source": { "partner": "Blue Harbor" },
            "length_ft": 82,
            "cabins": 4,
            "max_guests": 12,
            "crew": 3,
            "pricing_unit": "hour",
            "rate": 1200
        }))
        .unwrap();

        let d = date("2025-03-01");
        assert!(quote(&yacht, d, d, None).is_err());
        assert_eq!(quote(&yacht, d, d, Some(6)).unwrap().total, 7200);
    }
}
