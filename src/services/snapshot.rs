//! Dashboard snapshot composer.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use super::draw::{eligible_participants, is_eligible};
use crate::aggregation::{
    build_chart_data, build_daily_monthly_metrics, build_monthly_summary, build_participants,
    build_recent_participants, build_stats, ChartPoint, DailyMonthlyData, MonthlySummary,
    ParticipantRow, RecentParticipant, StatsData,
};
use crate::model::{Campaign, CampaignView, Document};

/// Every dashboard view, computed from one document in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: StatsData,
    pub chart_data: Vec<ChartPoint>,
    /// Campaigns with computed status.
    pub events: Vec<CampaignView>,
    pub recent_participants: Vec<RecentParticipant>,
    pub monthly_summary: MonthlySummary,
    pub participant_table: Vec<ParticipantRow>,
    pub daily_monthly: DailyMonthlyData,
}

/// Campaigns with status for `now`'s local date and the current pool size.
pub fn campaign_views(doc: &Document, now: &DateTime<FixedOffset>) -> Vec<CampaignView> {
    let pool = eligible_participants(&doc.events, &doc.campaigns).len();
    views(&doc.campaigns, now.date_naive(), pool)
}

fn views(campaigns: &[Campaign], today: NaiveDate, pool: usize) -> Vec<CampaignView> {
    campaigns
        .iter()
        .cloned()
        .map(|c| CampaignView::new(c, today, pool))
        .collect()
}

/// Each aggregation runs once; the campaign pool size is read off the
/// participant table.
pub fn compose_snapshot(doc: &Document, now: &DateTime<FixedOffset>) -> DashboardSnapshot {
    let events = &doc.events;
    let campaigns = &doc.campaigns;
    let participant_table = build_participants(events, campaigns);
    let pool = participant_table.iter().filter(|p| is_eligible(p)).count();

    DashboardSnapshot {
        stats: build_stats(events, now),
        chart_data: build_chart_data(events, now),
        events: views(campaigns, now.date_naive(), pool),
        recent_participants: build_recent_participants(events, now),
        monthly_summary: build_monthly_summary(events, campaigns, now),
        participant_table,
        daily_monthly: build_daily_monthly_metrics(events, campaigns, now),
    }
}
