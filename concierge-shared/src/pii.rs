use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

const MASK: &str = "***";

/// A wrapper for contact data that hides its value in Debug/Display output.
/// Serialization passes the real value through; callers decide what to expose.
#[derive(Clone, Deserialize, PartialEq, Eq, Default)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

const MASKED_EMAIL: &str = "***@***.com";

/// Keep the first character of the local part and the domain.
/// `james@whitfield.com` becomes `j***@whitfield.com`; anything without both
/// a local part and a domain collapses to `***@***.com`.
pub fn mask_email(email: &str) -> String {
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    // only the text up to a second '@' counts as the domain
    let domain = domain.split('@').next().unwrap_or_default();

    match local.chars().next() {
        Some(first) if !domain.is_empty() => format!("{}{}@{}", first, MASK, domain),
        _ => MASKED_EMAIL.to_string(),
    }
}

/// Keep the last four characters. Anything shorter is fully masked.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 4 {
        return MASK.to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}-{}", MASK, tail)
}
