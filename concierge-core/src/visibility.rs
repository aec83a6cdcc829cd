use concierge_shared::pii::{mask_email, mask_phone};

use crate::permissions::{Permission, Role};

pub fn display_email(role: Role, email: &str) -> String {
    if role.allows(Permission::ViewPii) {
        email.to_string()
    } else {
        mask_email(email)
    }
}

pub fn display_phone(role: Role, phone: &str) -> String {
    if role.allows(Permission::ViewPii) {
        phone.to_string()
    } else {
        mask_phone(phone)
    }
}
