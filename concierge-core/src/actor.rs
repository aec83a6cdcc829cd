use serde::{Deserialize, Serialize};

use crate::permissions::{Permission, Role};
use crate::CoreResult;

/// The console user performing an operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), role }
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.role.allows(permission)
    }

    pub fn require(&self, permission: Permission) -> CoreResult<()> {
        crate::permissions::ensure_permission(self.role, permission)
    }
}
