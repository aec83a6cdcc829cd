use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of rentable asset. Doubles as the line-item slot on a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Villa,
    Car,
    Yacht,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [ListingKind::Villa, ListingKind::Car, ListingKind::Yacht];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Villa => "villa",
            ListingKind::Car => "car",
            ListingKind::Yacht => "yacht",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "villa" => Ok(ListingKind::Villa),
            "car" => Ok(ListingKind::Car),
            "yacht" => Ok(ListingKind::Yacht),
            other => Err(format!("unknown listing kind: {}", other)),
        }
    }
}
