//! Campaign draw engine.
//!
//! Picks one winner uniformly at random from every participant with at
//! least one point. Points gate eligibility but do not weight the pick, and
//! earlier winners stay in the pool.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::{Result, ServiceError};
use crate::aggregation::{build_participants, ParticipantRow};
use crate::model::{Campaign, Document, Event, Winner};

/// Result of one draw attempt. Serializes as `{campaign, winner}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawOutcome {
    /// Campaign state after the draw.
    pub campaign: Campaign,
    /// `None` when the campaign was full or nobody was eligible.
    pub winner: Option<Winner>,
    /// Size of the eligible pool.
    #[serde(skip)]
    pub eligible: usize,
}

impl DrawOutcome {
    fn no_winner(campaign: &Campaign, eligible: usize) -> Self {
        Self {
            campaign: campaign.clone(),
            winner: None,
            eligible,
        }
    }
}

/// A participant may win once they hold at least one point.
pub fn is_eligible(row: &ParticipantRow) -> bool {
    row.total_points > 0
}

/// Participants who may win.
pub fn eligible_participants(events: &[Event], campaigns: &[Campaign]) -> Vec<ParticipantRow> {
    build_participants(events, campaigns)
        .into_iter()
        .filter(is_eligible)
        .collect()
}

/// Draw a winner for `campaign_id`, updating `doc` in place on success.
pub fn draw_winner<R: Rng + ?Sized>(
    doc: &mut Document,
    campaign_id: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<DrawOutcome> {
    let pool = eligible_participants(&doc.events, &doc.campaigns);
    let campaign = doc
        .campaign_mut(campaign_id)
        .ok_or_else(|| ServiceError::CampaignNotFound(campaign_id.to_string()))?;

    if campaign.is_full() || pool.is_empty() {
        return Ok(DrawOutcome::no_winner(campaign, pool.len()));
    }

    let picked = &pool[rng.random_range(0..pool.len())];
    let winner = Winner {
        participant_id: picked.id.clone(),
        name: picked.name.clone(),
        timestamp: now,
    };
    campaign.add_winner(winner.clone());

    Ok(DrawOutcome {
        campaign: campaign.clone(),
        winner: Some(winner),
        eligible: pool.len(),
    })
}
