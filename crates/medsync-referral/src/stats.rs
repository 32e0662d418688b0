//! System statistics for the dashboard

use crate::facility::Facility;
use crate::referral::{ReferralRequest, ReferralStatus};
use serde::Serialize;

/// Facilities shown in the "busiest" list
pub const BUSIEST_FACILITIES_SHOWN: usize = 3;

/// Facilities with the most referrals in the last 24h, busiest first
///
/// Ties keep the input order.
pub fn busiest_facilities(facilities: &[Facility], n: usize) -> Vec<&Facility> {
    let mut ranked: Vec<&Facility> = facilities.iter().collect();
    ranked.sort_by(|a, b| b.recent_activity.cmp(&a.recent_activity));
    ranked.truncate(n);
    ranked
}

/// Bed status for one facility
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedStatus {
    pub facility_id: String,
    pub available_beds: u32,
    pub total_beds: u32,
    /// Percentage of beds in use
    pub occupancy_rate: f64,
    pub crowd_level: String,
}

impl BedStatus {
    pub fn of(facility: &Facility) -> Self {
        BedStatus {
            facility_id: facility.id.clone(),
            available_beds: facility.available_beds,
            total_beds: facility.total_beds,
            occupancy_rate: facility.occupancy_rate(),
            crowd_level: facility.crowd_level.to_string(),
        }
    }
}

/// Referral counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReferralCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub completed: usize,
}

impl ReferralCounts {
    pub fn tally(referrals: &[ReferralRequest]) -> Self {
        let mut counts = ReferralCounts::default();
        for referral in referrals {
            match referral.status {
                ReferralStatus::Pending => counts.pending += 1,
                ReferralStatus::Approved => counts.approved += 1,
                ReferralStatus::Rejected => counts.rejected += 1,
                ReferralStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected + self.completed
    }
}

/// Everything the statistics card shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub busiest: Vec<BusyFacility>,
    pub beds: Vec<BedStatus>,
    pub referrals: ReferralCounts,
}

/// Entry of the busiest-facilities list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyFacility {
    pub id: String,
    pub name: String,
    pub recent_activity: u32,
}

impl SystemStats {
    pub fn collect(facilities: &[Facility], referrals: &[ReferralRequest], top: usize) -> Self {
        SystemStats {
            busiest: busiest_facilities(facilities, top)
                .into_iter()
                .map(|f| BusyFacility {
                    id: f.id.clone(),
                    name: f.name.clone(),
                    recent_activity: f.recent_activity,
                })
                .collect(),
            beds: facilities.iter().map(BedStatus::of).collect(),
            referrals: ReferralCounts::tally(referrals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;
    use chrono::Utc;

    #[test]
    fn test_busiest_facilities() {
        let facilities = mock_data::facilities();
        let busiest: Vec<&str> = busiest_facilities(&facilities, BUSIEST_FACILITIES_SHOWN)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(busiest, vec!["f4", "f2", "f3"]);
    }

    #[test]
    fn test_busiest_ties_keep_order() {
        let mut facilities = mock_data::facilities();
        for f in &mut facilities {
            f.recent_activity = 7;
        }
        let ids: Vec<&str> = busiest_facilities(&facilities, 2).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
    }

    #[test]
    fn test_bed_status() {
        let facilities = mock_data::facilities();
        let status = BedStatus::of(&facilities[0]);
        assert_eq!(status.occupancy_rate.round(), 70.0);
        assert_eq!(status.crowd_level, "Low");
    }

    #[test]
    fn test_referral_counts() {
        let referrals = mock_data::referrals(Utc::now());
        let counts = ReferralCounts::tally(&referrals);
        assert_eq!(
            counts,
            ReferralCounts { pending: 1, approved: 2, rejected: 1, completed: 2 }
        );
        assert_eq!(counts.total(), referrals.len());
    }

    #[test]
    fn test_collect() {
        let stats = SystemStats::collect(&mock_data::facilities(), &[], 3);
        assert_eq!(stats.busiest.len(), 3);
        assert_eq!(stats.busiest[0].recent_activity, 58);
        assert_eq!(stats.beds.len(), 5);
        assert_eq!(stats.referrals.total(), 0);
    }
}
