use concierge_core::{validation, Actor, CoreError, Permission};
use concierge_shared::{Masked, Note};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::profile::{AccountStatus, UserProfile};

const DEFAULT_MAX_NOTE_CHARS: usize = 2000;

/// Profile edits (contact, lifetime value, activation) share one capability
const PROFILE_EDIT: Permission = Permission::EditLifetimeValue;

/// Edit-contact form payload
#[derive(Debug, Clone, Deserialize)]
pub struct ContactUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// In-memory customer account store
pub struct AccountDirectory {
    users: HashMap<Uuid, UserProfile>,
    max_note_chars: usize,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            max_note_chars: DEFAULT_MAX_NOTE_CHARS,
        }
    }

    pub fn with_note_limit(mut self, max_note_chars: usize) -> Self {
        self.max_note_chars = max_note_chars;
        self
    }

    pub fn insert(&mut self, user: UserProfile) {
        self.users.insert(user.id, user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, user_id: &Uuid) -> Option<&UserProfile> {
        self.users.get(user_id)
    }

    /// Sorted by name; `search` matches name or email, case-insensitive
    pub fn list(&self, search: Option<&str>) -> Vec<&UserProfile> {
        let needle = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
        let mut out: Vec<&UserProfile> = self
            .users
            .values()
            .filter(|u| match &needle {
                Some(n) => u.name.to_lowercase().contains(n) || u.email.expose().to_lowercase().contains(n),
                None => true,
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn update_contact(
        &mut self,
        actor: &Actor,
        user_id: &Uuid,
        update: ContactUpdate,
    ) -> Result<&UserProfile, AccountError> {
        actor.require(PROFILE_EDIT)?;
        let name = validation::validate_name(&update.name)?;
        let email = validation::validate_email(&update.email)?;

        let user = self.get_user_mut(user_id)?;
        user.name = name;
        user.email = Masked(email);
        user.phone = Masked(update.phone.trim().to_string());
        tracing::info!(user_id = %user_id, actor = %actor.name, "contact details updated");
        Ok(&*user)
    }

    pub fn add_note(&mut self, actor: &Actor, user_id: &Uuid, body: &str) -> Result<Note, AccountError> {
        actor.require(Permission::AddUserNotes)?;
        let body = validation::validate_note(body, self.max_note_chars)?;
        let user = self.get_user_mut(user_id)?;

        let note = Note::new(&actor.name, body);
        user.notes.push(note.clone());
        Ok(note)
    }

    pub fn deactivate(&mut self, actor: &Actor, user_id: &Uuid) -> Result<&UserProfile, AccountError> {
        self.transition(actor, user_id, AccountStatus::Active, AccountStatus::Deactivated)
    }

    pub fn reactivate(&mut self, actor: &Actor, user_id: &Uuid) -> Result<&UserProfile, AccountError> {
        self.transition(actor, user_id, AccountStatus::Deactivated, AccountStatus::Active)
    }

    /// Manual correction of the customer's lifetime spend
    pub fn set_lifetime_value(
        &mut self,
        actor: &Actor,
        user_id: &Uuid,
        value_usd: i64,
    ) -> Result<&UserProfile, AccountError> {
        actor.require(PROFILE_EDIT)?;
        if value_usd < 0 {
            return Err(CoreError::ValidationError(format!(
                "lifetime value must not be negative, got {}",
                value_usd
            ))
            .into());
        }

        let user = self.get_user_mut(user_id)?;
        let previous = user.stats.lifetime_value_usd;
        user.stats.lifetime_value_usd = value_usd;
        tracing::info!(user_id = %user_id, previous, value_usd, actor = %actor.name, "lifetime value set");
        Ok(&*user)
    }

    fn transition(
        &mut self,
        actor: &Actor,
        user_id: &Uuid,
        from: AccountStatus,
        to: AccountStatus,
    ) -> Result<&UserProfile, AccountError> {
        actor.require(PROFILE_EDIT)?;
        let user = self.get_user_mut(user_id)?;

        if user.status != from {
            return Err(AccountError::InvalidTransition {
                from: user.status,
                to,
            });
        }

        user.status = to;
        tracing::info!(user_id = %user_id, status = ?to, actor = %actor.name, "account status changed");
        Ok(&*user)
    }

    fn get_user_mut(&mut self, user_id: &Uuid) -> Result<&mut UserProfile, AccountError> {
        self.users
            .get_mut(user_id)
            .ok_or(AccountError::NotFound(*user_id))
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid account transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: AccountStatus,
        to: AccountStatus,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::Role;

    fn seeded() -> (AccountDirectory, Uuid) {
        let mut directory = AccountDirectory::new();
        let user = UserProfile::new("James Whitfield", "james@whitfield.com", "+1 (305) 555-0142");
        let id = user.id;
        directory.insert(user);
        directory.insert(UserProfile::new("Sofia Marchetti", "sofia@marchetti.it", "+39 06 5550 1234"));
        (directory, id)
    }

    fn admin() -> Actor {
        Actor::new("Ada", Role::Admin)
    }

    #[test]
    fn test_update_contact_validates() {
        let (mut directory, id) = seeded();

        let bad_email = ContactUpdate {
            name: "James W.".to_string(),
            email: "james.whitfield.com".to_string(),
            phone: "555".to_string(),
        };
        assert!(directory.update_contact(&admin(), &id, bad_email).is_err());

        let blank_name = ContactUpdate {
            name: " ".to_string(),
            email: "james@whitfield.com".to_string(),
            phone: "555".to_string(),
        };
        assert!(directory.update_contact(&admin(), &id, blank_name).is_err());

        let good = ContactUpdate {
            name: "James W.".to_string(),
            email: "jw@whitfield.com".to_string(),
            phone: "+1 305 555 9999".to_string(),
        };
        let user = directory.update_contact(&admin(), &id, good).unwrap();
        assert_eq!(user.name, "James W.");
        assert_eq!(user.email.expose(), "jw@whitfield.com");
    }

    #[test]
    fn test_deactivate_round_trip() {
        let (mut directory, id) = seeded();

        assert!(!directory.deactivate(&admin(), &id).unwrap().is_active());
        let err = directory.deactivate(&admin(), &id).unwrap_err();
        assert!(matches!(err, AccountError::InvalidTransition { .. }));

        assert!(directory.reactivate(&admin(), &id).unwrap().is_active());
    }

    #[test]
    fn test_viewer_cannot_edit() {
        let (mut directory, id) = seeded();
        let viewer = Actor::new("Vic", Role::Viewer);

        assert!(directory.deactivate(&viewer, &id).is_err());
        assert!(directory.add_note(&viewer, &id, "hello").is_err());
        assert!(directory.get(&id).unwrap().is_active());
    }

    #[test]
    fn test_notes() {
        let (mut directory, id) = seeded();

        let note = directory.add_note(&admin(), &id, "Prefers late checkout").unwrap();
        assert_eq!(note.author, "Ada");
        assert_eq!(directory.get(&id).unwrap().notes.len(), 1);
        assert!(directory.add_note(&admin(), &id, "   ").is_err());
    }

    #[test]
    fn test_set_lifetime_value() {
        let (mut directory, id) = seeded();

        let user = directory.set_lifetime_value(&admin(), &id, 48500).unwrap();
        assert_eq!(user.stats.lifetime_value_usd, 48500);
        assert_eq!(user.stats.trip_count, 0);

        assert!(matches!(
            directory.set_lifetime_value(&admin(), &id, -1),
            Err(AccountError::Core(CoreError::ValidationError(_)))
        ));
        let viewer = Actor::new("Vic", Role::Viewer);
        assert!(matches!(
            directory.set_lifetime_value(&viewer, &id, 0),
            Err(AccountError::Core(CoreError::PermissionDenied { .. }))
        ));
        assert!(matches!(
            directory.set_lifetime_value(&admin(), &Uuid::new_v4(), 1),
            Err(AccountError::NotFound(_))
        ));
        assert_eq!(directory.get(&id).unwrap().stats.lifetime_value_usd, 48500);
    }

    #[test]
    fn test_list_search() {
        let (directory, _) = seeded();
        let all = directory.list(None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "James Whitfield");

        assert_eq!(directory.list(Some("MARCHETTI")).len(), 1);
        assert_eq!(directory.list(Some("  ")).len(), 2);
    }
}
