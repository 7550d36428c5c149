//! Engagement events.
//!
//! An event is an append-only fact: once written it never changes. Reward
//! points and cost are fixed at insert time from the action tables below.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// QR identifier recorded when a request does not carry one.
pub const UNKNOWN_QR_ID: &str = "unknown";

/// Error returned when an action string is not one of `qr`, `coupon`, `review`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("action must be one of coupon, review, qr")]
pub struct ParseActionError;

/// What the customer did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// QR code scanned. Legacy documents only ever recorded scans, so an
    /// event without an action is one.
    #[default]
    Qr,
    /// Coupon clicked.
    Coupon,
    /// Review submitted.
    Review,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Qr => "qr",
            Action::Coupon => "coupon",
            Action::Review => "review",
        }
    }

    /// Reward points credited for this action.
    pub fn points(&self) -> i64 {
        match self {
            Action::Qr => 0,
            Action::Coupon => 100,
            Action::Review => 200,
        }
    }

    /// Monetary cost of this action to the merchant.
    pub fn reward(&self) -> i64 {
        match self {
            Action::Qr => 0,
            Action::Coupon => 2000,
            Action::Review => 0,
        }
    }

    /// Coupon and review events count as engagement; scans do not.
    pub fn is_engagement(&self) -> bool {
        matches!(self, Action::Coupon | Action::Review)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr" => Ok(Action::Qr),
            "coupon" => Ok(Action::Coupon),
            "review" => Ok(Action::Review),
            _ => Err(ParseActionError),
        }
    }
}

/// A recorded scan, coupon click, or review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub action: Action,
    #[serde(default = "unknown_qr_id", deserialize_with = "qr_id_or_unknown")]
    pub qr_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub reward: i64,
}

impl Event {
    pub fn user_name(&self) -> Option<&str> {
        non_empty(self.user_name.as_deref())
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    pub fn ip(&self) -> Option<&str> {
        non_empty(self.ip.as_deref())
    }

    pub fn user_id(&self) -> Option<&str> {
        non_empty(self.user_id.as_deref())
    }
}

/// Treats an empty string the same as a missing value.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn unknown_qr_id() -> String {
    UNKNOWN_QR_ID.to_string()
}

fn qr_id_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()).unwrap_or_else(unknown_qr_id))
}
