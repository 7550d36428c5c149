//! Promotional campaigns and their winners.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of prize a campaign hands out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    #[default]
    Coupon,
    Giftcard,
    Product,
}

/// Lifecycle status, always computed from the date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Upcoming,
    Active,
    Ended,
}

/// One draw result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub participant_id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// A time-boxed prize draw with a winner cap.
///
/// `current_winners` only ever increases and always equals `winners.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    /// Prize description.
    #[serde(default)]
    pub reward: String,
    #[serde(default)]
    pub reward_value: i64,
    #[serde(default)]
    pub reward_type: RewardType,
    #[serde(default)]
    pub max_winners: u32,
    #[serde(default)]
    pub current_winners: u32,
    #[serde(default)]
    pub winners: Vec<Winner>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_points_per_click")]
    pub points_per_click: i64,
    #[serde(default = "default_points_per_review")]
    pub points_per_review: i64,
}

fn default_points_per_click() -> i64 {
    100
}

fn default_points_per_review() -> i64 {
    200
}

impl Campaign {
    /// Status on `today`: before the start date the campaign is upcoming,
    /// after the end date it has ended, otherwise it is active.
    pub fn status(&self, today: NaiveDate) -> CampaignStatus {
        if today < self.start_date {
            CampaignStatus::Upcoming
        } else if today > self.end_date {
            CampaignStatus::Ended
        } else {
            CampaignStatus::Active
        }
    }

    /// No more winners can be drawn.
    pub fn is_full(&self) -> bool {
        self.current_winners >= self.max_winners
    }

    pub fn add_winner(&mut self, winner: Winner) {
        self.winners.push(winner);
        self.current_winners += 1;
    }

    /// Total prize cost of the winners drawn so far.
    pub fn winner_cost(&self) -> i64 {
        i64::from(self.current_winners) * self.reward_value
    }

    /// Number of times `participant_id` has won this campaign.
    pub fn win_count(&self, participant_id: &str) -> usize {
        self.winners
            .iter()
            .filter(|w| w.participant_id == participant_id)
            .count()
    }
}

/// Campaign as served to the dashboard, with derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub status: CampaignStatus,
    /// Size of the draw-eligible pool.
    pub participants: usize,
}

impl CampaignView {
    pub fn new(campaign: Campaign, today: NaiveDate, participants: usize) -> Self {
        let status = campaign.status(today);
        Self {
            campaign,
            status,
            participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn campaign(start: &str, end: &str) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            name: "Spring".to_string(),
            reward: "Coffee".to_string(),
            reward_value: 4500,
            reward_type: RewardType::Giftcard,
            max_winners: 2,
            current_winners: 0,
            winners: vec![],
            start_date: date(start),
            end_date: date(end),
            points_per_click: 100,
            points_per_review: 200,
        }
    }

    #[test]
    fn test_status_from_dates() {
        let c = campaign("2024-03-10", "2024-03-20");
        assert_eq!(c.status(date("2024-03-09")), CampaignStatus::Upcoming);
        assert_eq!(c.status(date("2024-03-10")), CampaignStatus::Active);
        assert_eq!(c.status(date("2024-03-20")), CampaignStatus::Active);
        assert_eq!(c.status(date("2024-03-21")), CampaignStatus::Ended);
    }

    #[test]
    fn test_stored_status_is_ignored() {
        let json = r#"{"id":"c1","name":"Old","status":"ended","startDate":"2024-03-10","endDate":"2024-03-20"}"#;
        let c: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(c.status(date("2024-03-15")), CampaignStatus::Active);
        assert_eq!(c.points_per_click, 100);
        assert_eq!(c.points_per_review, 200);

        let value = serde_json::to_value(&c).unwrap();
        assert!(value.get("status").is_none());
    }

    #[test]
    fn test_add_winner_keeps_counter_in_step() {
        let mut c = campaign("2024-03-10", "2024-03-20");
        c.add_winner(Winner {
            participant_id: "u1".to_string(),
            name: "Kim".to_string(),
            timestamp: "2024-03-12T10:00:00Z".parse().unwrap(),
        });
        assert_eq!(c.current_winners, 1);
        assert_eq!(c.winners.len(), 1);
        assert!(!c.is_full());
        assert_eq!(c.winner_cost(), 4500);
        assert_eq!(c.win_count("u1"), 1);
    }

    #[test]
    fn test_view_flattens_campaign() {
        let c = campaign("2024-03-10", "2024-03-20");
        let view = CampaignView::new(c, date("2024-03-25"), 3);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["id"], "c1");
        assert_eq!(value["rewardValue"], 4500);
        assert_eq!(value["status"], "ended");
        assert_eq!(value["participants"], 3);
    }
}
