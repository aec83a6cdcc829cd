use chrono::{DateTime, Utc};
use concierge_core::visibility::{display_email, display_phone};
use concierge_core::Role;
use concierge_shared::Note;
use serde::Serialize;
use uuid::Uuid;

use crate::profile::{AccountStats, AccountStatus, UserProfile};

/// A customer account as a given role sees it
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub stats: AccountStats,
    pub notes: Vec<Note>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl UserView {
    pub fn for_role(user: &UserProfile, role: Role) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: display_email(role, user.email.expose()),
            phone: display_phone(role, user.phone.expose()),
            stats: user.stats.clone(),
            notes: user.notes.clone(),
            status: user.status,
            created_at: user.created_at,
        }
    }
}
