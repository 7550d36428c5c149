//! The persisted document: every event plus every campaign.
//!
//! Older deployments stored a bare JSON array of scan events. Both shapes
//! are accepted on read; only the current `{events, campaigns}` shape is
//! ever written.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::campaign::{Campaign, RewardType};
use super::event::Event;

/// Single source of truth. `events` is newest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub events: Vec<Event>,
    pub campaigns: Vec<Campaign>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Legacy(Vec<Event>),
    Current {
        #[serde(default)]
        events: Option<Vec<Event>>,
        #[serde(default)]
        campaigns: Option<Vec<Campaign>>,
    },
}

impl Document {
    /// Parse a stored document, normalizing legacy shapes.
    ///
    /// Missing campaigns are seeded relative to `today`.
    pub fn from_json(bytes: &[u8], today: NaiveDate) -> serde_json::Result<Self> {
        let doc = match serde_json::from_slice::<StoredDocument>(bytes)? {
            StoredDocument::Legacy(events) => Document {
                events,
                campaigns: default_campaigns(today),
            },
            StoredDocument::Current { events, campaigns } => Document {
                events: events.unwrap_or_default(),
                campaigns: campaigns.unwrap_or_else(|| default_campaigns(today)),
            },
        };
        Ok(doc)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    /// Document used when nothing has been stored yet.
    pub fn seeded(today: NaiveDate) -> Self {
        Self {
            events: Vec::new(),
            campaigns: default_campaigns(today),
        }
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn campaign_mut(&mut self, id: &str) -> Option<&mut Campaign> {
        self.campaigns.iter_mut().find(|c| c.id == id)
    }
}

fn shift(today: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        today.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(today)
}

/// One running campaign and one upcoming campaign.
fn default_campaigns(today: NaiveDate) -> Vec<Campaign> {
    vec![
        Campaign {
            id: "campaign-1".to_string(),
            name: "리뷰 작성 이벤트".to_string(),
            reward: "스타벅스 아메리카노".to_string(),
            reward_value: 4500,
            reward_type: RewardType::Giftcard,
            max_winners: 10,
            current_winners: 0,
            winners: Vec::new(),
            start_date: shift(today, -7),
            end_date: shift(today, 23),
            points_per_click: 100,
            points_per_review: 200,
        },
        Campaign {
            id: "campaign-2".to_string(),
            name: "쿠폰 사용 감사 이벤트".to_string(),
            reward: "10% 할인 쿠폰".to_string(),
            reward_value: 2000,
            reward_type: RewardType::Coupon,
            max_winners: 5,
            current_winners: 0,
            winners: Vec::new(),
            start_date: shift(today, 30),
            end_date: shift(today, 60),
            points_per_click: 100,
            points_per_review: 200,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, CampaignStatus};

    fn today() -> NaiveDate {
        "2024-03-15".parse().unwrap()
    }

    #[test]
    fn test_legacy_array_is_normalized() {
        let json = br#"[
            {"id":"2","qrId":"table-2","timestamp":"2024-03-02T00:00:00.000Z","ip":"1.1.1.1"},
            {"id":"1","qrId":"table-1","timestamp":"2024-03-01T00:00:00.000Z","ip":"1.1.1.1"}
        ]"#;
        let doc = Document::from_json(json, today()).unwrap();

        assert_eq!(doc.events.len(), 2);
        assert_eq!(doc.events[0].id, "2");
        assert!(doc.events.iter().all(|e| e.action == Action::Qr));
        assert_eq!(doc.campaigns.len(), 2);
    }

    #[test]
    fn test_partial_object_is_filled() {
        let doc = Document::from_json(br#"{"campaigns":[]}"#, today()).unwrap();
        assert!(doc.events.is_empty());
        assert!(doc.campaigns.is_empty());

        let doc = Document::from_json(br#"{"events":[]}"#, today()).unwrap();
        assert_eq!(doc.campaigns.len(), 2);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Document::from_json(b"{not json", today()).is_err());
        assert!(Document::from_json(b"42", today()).is_err());
    }

    #[test]
    fn test_seeded_campaign_statuses() {
        let doc = Document::seeded(today());
        assert!(doc.events.is_empty());
        assert_eq!(doc.campaigns[0].status(today()), CampaignStatus::Active);
        assert_eq!(doc.campaigns[1].status(today()), CampaignStatus::Upcoming);
    }

    #[test]
    fn test_written_shape_reads_back() {
        let doc = Document::seeded(today());
        let bytes = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value["events"].is_array());
        assert!(value["campaigns"].is_array());
        assert_eq!(Document::from_json(&bytes, today()).unwrap(), doc);
    }
}
