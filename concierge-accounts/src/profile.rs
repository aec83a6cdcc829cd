use chrono::{DateTime, NaiveDate, Utc};
use concierge_shared::{Masked, Note};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    #[default]
    Active,
    Deactivated,
}

/// Lifetime figures for a customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AccountStats {
    pub trip_count: u32,
    pub lifetime_value_usd: i64,
    pub last_trip: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    #[serde(default)]
    pub stats: AccountStats,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: Masked(email.into()),
            phone: Masked(phone.into()),
            stats: AccountStats::default(),
            notes: Vec::new(),
            status: AccountStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default_when_absent() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": "11111111-1111-4111-8111-000000000009",
            "name": "Lena Fischer",
            "email": "lena@fischer.de",
            "phone": "+49 30 5550 1188",
            "created_at": "2024-03-02T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(profile.stats, AccountStats::default());
        assert!(profile.is_active());
    }

    #[test]
    fn test_profile_debug_hides_contact() {
        let profile = UserProfile::new("James Whitfield", "james@whitfield.com", "+1 (305) 555-0142");
        let debug = format!("{:?}", profile);
        assert!(!debug.contains("whitfield.com"));
        assert!(!debug.contains("555-0142"));
    }
}
