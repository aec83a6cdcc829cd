pub mod actor;
pub mod permissions;
pub mod validation;
pub mod visibility;

pub use actor::Actor;
pub use permissions::{has_permission, has_permission_named, Permission, Role};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Permission denied: {role} cannot {permission}")]
    PermissionDenied { role: Role, permission: Permission },
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
