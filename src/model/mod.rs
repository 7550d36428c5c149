//! Domain records: events, campaigns, identities, and the persisted document.

mod campaign;
mod document;
mod event;
mod identity;

pub use campaign::{Campaign, CampaignStatus, CampaignView, RewardType, Winner};
pub use document::Document;
pub use event::{Action, Event, ParseActionError, UNKNOWN_QR_ID};
pub use identity::{resolve_user_id, IdentityKey};
