//! Role → capability matrix for the console.
//!
//! Each role lists its capabilities explicitly. There is no inheritance:
//! owner happens to be a superset of admin, and admin of viewer, but that
//! is a property of the data below, not something computed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Viewer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewBookings,
    ViewBookingDetail,
    ApproveDeclineItems,
    AddNotes,
    ViewPii,
    ViewInventory,
    AddEditListings,
    DeleteListings,
    ToggleStatusFeatured,
    BlockCalendar,
    ViewUsers,
    ViewUserDetail,
    EditLifetimeValue,
    AddUserNotes,
    ExportData,
    ManageAdmins,
}

const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::ViewBookings,
    Permission::ViewBookingDetail,
    Permission::ApproveDeclineItems,
    Permission::AddNotes,
    Permission::ViewPii,
    Permission::ViewInventory,
    Permission::AddEditListings,
    Permission::DeleteListings,
    Permission::ToggleStatusFeatured,
    Permission::BlockCalendar,
    Permission::ViewUsers,
    Permission::ViewUserDetail,
    Permission::EditLifetimeValue,
    Permission::AddUserNotes,
    Permission::ExportData,
    Permission::ManageAdmins,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewBookings,
    Permission::ViewBookingDetail,
    Permission::ApproveDeclineItems,
    Permission::AddNotes,
    Permission::ViewPii,
    Permission::ViewInventory,
    Permission::AddEditListings,
    Permission::ToggleStatusFeatured,
    Permission::BlockCalendar,
    Permission::ViewUsers,
    Permission::ViewUserDetail,
    Permission::EditLifetimeValue,
    Permission::AddUserNotes,
];

const VIEWER_PERMISSIONS: &[Permission] = &[
    Permission::ViewBookings,
    Permission::ViewBookingDetail,
    Permission::ViewInventory,
    Permission::ViewUsers,
    Permission::ViewUserDetail,
];

impl Role {
    pub const ALL: [Role; 3] = [Role::Owner, Role::Admin, Role::Viewer];

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Owner => OWNER_PERMISSIONS,
            Role::Admin => ADMIN_PERMISSIONS,
            Role::Viewer => VIEWER_PERMISSIONS,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Viewer => "viewer",
        }
    }
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ViewBookings,
        Permission::ViewBookingDetail,
        Permission::ApproveDeclineItems,
        Permission::AddNotes,
        Permission::ViewPii,
        Permission::ViewInventory,
        Permission::AddEditListings,
        Permission::DeleteListings,
        Permission::ToggleStatusFeatured,
        Permission::BlockCalendar,
        Permission::ViewUsers,
        Permission::ViewUserDetail,
        Permission::EditLifetimeValue,
        Permission::AddUserNotes,
        Permission::ExportData,
        Permission::ManageAdmins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewBookings => "view_bookings",
            Permission::ViewBookingDetail => "view_booking_detail",
            Permission::ApproveDeclineItems => "approve_decline_items",
            Permission::AddNotes => "add_notes",
            Permission::ViewPii => "view_pii",
            Permission::ViewInventory => "view_inventory",
            Permission::AddEditListings => "add_edit_listings",
            Permission::DeleteListings => "delete_listings",
            Permission::ToggleStatusFeatured => "toggle_status_featured",
            Permission::BlockCalendar => "block_calendar",
            Permission::ViewUsers => "view_users",
            Permission::ViewUserDetail => "view_user_detail",
            Permission::EditLifetimeValue => "edit_lifetime_value",
            Permission::AddUserNotes => "add_user_notes",
            Permission::ExportData => "export_data",
            Permission::ManageAdmins => "manage_admins",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown permission: {}", s))
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role.allows(permission)
}

/// String-keyed lookup. Unknown roles or permissions are never permitted.
pub fn has_permission_named(role: &str, permission: &str) -> bool {
    match (role.parse::<Role>(), permission.parse::<Permission>()) {
        (Ok(role), Ok(permission)) => role.allows(permission),
        _ => false,
    }
}

pub fn ensure_permission(role: Role, permission: Permission) -> CoreResult<()> {
    if role.allows(permission) {
        Ok(())
    } else {
        tracing::warn!(%role, %permission, "permission denied");
        Err(CoreError::PermissionDenied { role, permission })
    }
}
