//! Participant identity resolution.
//!
//! Events carry best-effort identity hints. A participant is keyed by the
//! first hint present, in precedence order `userId`, `phone`, `ip`, falling
//! back to the event's own id so that anonymous events still roll up.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::event::{non_empty, Event};

/// The identity an event is attributed to.
///
/// The variant records which hint resolved the key. Equality and hashing
/// use the resolved string only, so `User("1.1.1.1")` and `Ip("1.1.1.1")`
/// are the same participant.
#[derive(Debug, Clone)]
pub enum IdentityKey {
    User(String),
    Phone(String),
    Ip(String),
    /// No hint at all: the event stands alone.
    Event(String),
}

impl IdentityKey {
    /// Resolve from the identity hints only. `None` when the event is anonymous.
    pub fn known(event: &Event) -> Option<Self> {
        if let Some(user_id) = event.user_id() {
            return Some(IdentityKey::User(user_id.to_string()));
        }
        if let Some(phone) = event.phone() {
            return Some(IdentityKey::Phone(phone.to_string()));
        }
        event.ip().map(|ip| IdentityKey::Ip(ip.to_string()))
    }

    /// Resolve with the event id as the last resort.
    pub fn resolve(event: &Event) -> Self {
        Self::known(event).unwrap_or_else(|| IdentityKey::Event(event.id.clone()))
    }

    /// The participant id stored in winner records.
    pub fn as_str(&self) -> &str {
        match self {
            IdentityKey::User(v) | IdentityKey::Phone(v) | IdentityKey::Ip(v) | IdentityKey::Event(v) => v,
        }
    }
}

impl PartialEq for IdentityKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for IdentityKey {}

impl Hash for IdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `userId` stored on a new event: explicit user id, else phone, else ip.
pub fn resolve_user_id(user_id: Option<&str>, phone: Option<&str>, ip: Option<&str>) -> Option<String> {
    non_empty(user_id)
        .or_else(|| non_empty(phone))
        .or_else(|| non_empty(ip))
        .map(str::to_string)
}
