//! Referral requests and their review lifecycle
//!
//! A request starts `Pending`. The receiving side approves or rejects it;
//! an approved referral is later marked `Completed`. The dashboard groups
//! requests into pending, active and history lists.

use crate::error::{ReferralError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Number of history entries shown on the dashboard
pub const RECENT_HISTORY_LIMIT: usize = 5;

// ============================================================================
// Request Types
// ============================================================================

/// Clinical urgency of a referral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Label used in listings, e.g. "High Priority"
    pub fn priority_label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low Priority",
            Urgency::Medium => "Medium Priority",
            Urgency::High => "High Priority",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        };
        f.write_str(label)
    }
}

/// Review status of a referral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferralStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ReferralStatus {
    /// Whether the referral has left the review queue for good
    pub fn is_closed(&self) -> bool {
        matches!(self, ReferralStatus::Rejected | ReferralStatus::Completed)
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReferralStatus::Pending => "Pending",
            ReferralStatus::Approved => "Approved",
            ReferralStatus::Rejected => "Rejected",
            ReferralStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// A request to move a patient's care to another facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralRequest {
    pub id: String,
    pub patient_id: String,
    /// Referring facility name
    pub from_facility: String,
    /// Receiving facility name
    pub to_facility: String,
    pub diagnosis: String,
    pub required_procedures: Vec<String>,
    pub urgency: Urgency,
    pub status: ReferralStatus,
    /// Patient data categories sent along
    pub selected_data: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl ReferralRequest {
    /// Pending -> Approved
    pub fn approve(&mut self) -> Result<()> {
        self.transition(ReferralStatus::Pending, ReferralStatus::Approved)
    }

    /// Pending -> Rejected, keeping the reason if one is given
    pub fn reject(&mut self, reason: Option<String>) -> Result<()> {
        self.transition(ReferralStatus::Pending, ReferralStatus::Rejected)?;
        self.rejection_reason = reason;
        Ok(())
    }

    /// Approved -> Completed
    pub fn complete(&mut self) -> Result<()> {
        self.transition(ReferralStatus::Approved, ReferralStatus::Completed)
    }

    fn transition(&mut self, expected: ReferralStatus, next: ReferralStatus) -> Result<()> {
        if self.status != expected {
            return Err(ReferralError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        info!(referral = %self.id, from = %self.status, to = %next, "referral status changed");
        self.status = next;
        Ok(())
    }
}

// ============================================================================
// Referral Book
// ============================================================================

/// Owns the referral list and applies review actions by id
#[derive(Debug, Clone, Default)]
pub struct ReferralBook {
    referrals: Vec<ReferralRequest>,
}

impl ReferralBook {
    pub fn new(referrals: Vec<ReferralRequest>) -> Self {
        ReferralBook { referrals }
    }

    /// All referrals in insertion order
    pub fn referrals(&self) -> &[ReferralRequest] {
        &self.referrals
    }

    pub fn get(&self, id: &str) -> Option<&ReferralRequest> {
        self.referrals.iter().find(|r| r.id == id)
    }

    /// Append a new request
    pub fn submit(&mut self, referral: ReferralRequest) {
        self.referrals.push(referral);
    }

    pub fn approve(&mut self, id: &str) -> Result<()> {
        self.get_mut(id)?.approve()
    }

    pub fn reject(&mut self, id: &str, reason: Option<String>) -> Result<()> {
        self.get_mut(id)?.reject(reason)
    }

    pub fn complete(&mut self, id: &str) -> Result<()> {
        self.get_mut(id)?.complete()
    }

    /// Group the current referrals for display
    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::from_referrals(&self.referrals)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ReferralRequest> {
        self.referrals
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ReferralError::ReferralNotFound(id.to_string()))
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Referrals grouped the way the dashboard lists them
#[derive(Debug, Clone, Default)]
pub struct Dashboard<'a> {
    /// Awaiting review
    pub pending: Vec<&'a ReferralRequest>,
    /// Approved and in progress
    pub active: Vec<&'a ReferralRequest>,
    /// Completed or rejected
    pub history: Vec<&'a ReferralRequest>,
}

impl<'a> Dashboard<'a> {
    /// Partition referrals by status, keeping input order within each group
    pub fn from_referrals(referrals: &'a [ReferralRequest]) -> Self {
        let mut dashboard = Dashboard::default();
        for referral in referrals {
            match referral.status {
                ReferralStatus::Pending => dashboard.pending.push(referral),
                ReferralStatus::Approved => dashboard.active.push(referral),
                ReferralStatus::Completed | ReferralStatus::Rejected => {
                    dashboard.history.push(referral)
                }
            }
        }
        dashboard
    }

    /// The first few history entries
    pub fn recent_history(&self) -> &[&'a ReferralRequest] {
        let end = self.history.len().min(RECENT_HISTORY_LIMIT);
        &self.history[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;

    fn book() -> ReferralBook {
        ReferralBook::new(mock_data::referrals(Utc::now()))
    }

    #[test]
    fn test_dashboard_partition() {
        let book = book();
        let dashboard = book.dashboard();

        let ids = |list: &[&ReferralRequest]| list.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&dashboard.pending), vec!["r1"]);
        assert_eq!(ids(&dashboard.active), vec!["r2", "r4"]);
        assert_eq!(ids(&dashboard.history), vec!["r3", "r5", "r6"]);
        assert_eq!(
            dashboard.pending.len() + dashboard.active.len() + dashboard.history.len(),
            book.referrals().len()
        );
    }

    #[test]
    fn test_approve_pending() {
        let mut book = book();
        book.approve("r1").unwrap();

        assert_eq!(book.get("r1").unwrap().status, ReferralStatus::Approved);
        assert!(book.dashboard().pending.is_empty());
        assert_eq!(book.dashboard().active.len(), 3);
    }

    #[test]
    fn test_reject_records_reason() {
        let mut book = book();
        book.reject("r1", Some("No cardiac beds".to_string())).unwrap();

        let r1 = book.get("r1").unwrap();
        assert_eq!(r1.status, ReferralStatus::Rejected);
        assert_eq!(r1.rejection_reason.as_deref(), Some("No cardiac beds"));
        assert!(r1.status.is_closed());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut book = book();

        // r2 is already approved
        match book.approve("r2") {
            Err(ReferralError::InvalidTransition { from, to }) => {
                assert_eq!(from, ReferralStatus::Approved);
                assert_eq!(to, ReferralStatus::Approved);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
        // r1 is pending and cannot be completed yet
        assert!(book.complete("r1").is_err());
        // Completed referrals are final
        assert!(book.reject("r3", None).is_err());

        book.complete("r2").unwrap();
        assert_eq!(book.get("r2").unwrap().status, ReferralStatus::Completed);
    }

    #[test]
    fn test_unknown_referral() {
        let mut book = book();
        assert!(matches!(
            book.approve("r99"),
            Err(ReferralError::ReferralNotFound(id)) if id == "r99"
        ));
    }

    #[test]
    fn test_recent_history_limit() {
        let now = Utc::now();
        let mut referrals = Vec::new();
        for i in 0..8 {
            let mut r = mock_data::referrals(now).remove(2);
            r.id = format!("h{}", i);
            referrals.push(r);
        }
        let dashboard = Dashboard::from_referrals(&referrals);
        assert_eq!(dashboard.history.len(), 8);
        assert_eq!(dashboard.recent_history().len(), RECENT_HISTORY_LIMIT);
        assert_eq!(dashboard.recent_history()[0].id, "h0");
    }

    #[test]
    fn test_json_shape() {
        let r = &mock_data::referrals(Utc::now())[0];
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["patientId"], "p1");
        assert_eq!(json["urgency"], "High");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("rejectionReason").is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Urgency::High.priority_label(), "High Priority");
        assert_eq!(Urgency::Low.to_string(), "Low");
        assert_eq!(ReferralStatus::Completed.to_string(), "Completed");
    }
}
