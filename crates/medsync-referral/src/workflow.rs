//! New-referral wizard
//!
//! The wizard walks a single referral through four steps:
//!
//! ```text
//! CollectingInput -> RecommendationsShown -> FacilitySelected -> HandedOff
//! ```
//!
//! Recommendations may be requested again (after editing the form) until
//! the referral is handed off; doing so clears any earlier selection.
//! Handoff produces a [`TransferPackage`] for the data-transfer step.

use crate::error::{ReferralError, Result};
use crate::recommend::{Recommender, ScoredFacility};
use crate::referral::{ReferralRequest, ReferralStatus, Urgency};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

// ============================================================================
// Form
// ============================================================================

/// Inputs collected by the referral form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferralForm {
    pub diagnosis: String,
    pub procedures: Vec<String>,
    pub patient_address: String,
    pub urgency: Option<Urgency>,
    pub notes: String,
}

impl ReferralForm {
    /// Add the procedure if absent, remove it if present
    pub fn toggle_procedure(&mut self, procedure: &str) {
        if let Some(pos) = self.procedures.iter().position(|p| p == procedure) {
            self.procedures.remove(pos);
        } else {
            self.procedures.push(procedure.to_string());
        }
    }

    /// Check the form is complete enough to rank facilities
    pub fn validate(&self) -> Result<()> {
        if self.diagnosis.trim().is_empty() {
            return Err(ReferralError::MissingDiagnosis);
        }
        if self.procedures.is_empty() {
            return Err(ReferralError::NoProceduresSelected);
        }
        Ok(())
    }
}

// ============================================================================
// Handoff
// ============================================================================

/// Everything the data-transfer step needs about a referral
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPackage {
    pub referral_id: String,
    pub facility_id: String,
    pub facility_name: String,
    pub diagnosis: String,
    pub procedures: Vec<String>,
    pub urgency: Option<Urgency>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TransferPackage {
    /// File the package as a pending referral request
    ///
    /// A referral submitted without an urgency is filed as `Medium`.
    pub fn into_referral_request(
        self,
        patient_id: &str,
        from_facility: &str,
        selected_data: Vec<String>,
    ) -> ReferralRequest {
        ReferralRequest {
            id: self.referral_id,
            patient_id: patient_id.to_string(),
            from_facility: from_facility.to_string(),
            to_facility: self.facility_name,
            diagnosis: self.diagnosis,
            required_procedures: self.procedures,
            urgency: self.urgency.unwrap_or(Urgency::Medium),
            status: ReferralStatus::Pending,
            selected_data,
            created_at: self.created_at,
            notes: self.notes,
            rejection_reason: None,
        }
    }
}

/// Referral id derived from the creation time, e.g. `ref_1718000000000`
pub fn referral_id_at(now: DateTime<Utc>) -> String {
    format!("ref_{}", now.timestamp_millis())
}

// ============================================================================
// State Machine
// ============================================================================

/// Current step of the wizard
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    CollectingInput,
    RecommendationsShown {
        recommendations: Vec<ScoredFacility>,
    },
    FacilitySelected {
        recommendations: Vec<ScoredFacility>,
        facility_id: String,
    },
    HandedOff {
        package: TransferPackage,
    },
}

impl WizardState {
    /// Step name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::CollectingInput => "collecting input",
            WizardState::RecommendationsShown { .. } => "recommendations shown",
            WizardState::FacilitySelected { .. } => "facility selected",
            WizardState::HandedOff { .. } => "handed off",
        }
    }
}

/// Drives one referral from form entry to handoff
#[derive(Debug)]
pub struct ReferralWizard<'a> {
    recommender: &'a Recommender,
    form: ReferralForm,
    state: WizardState,
}

impl<'a> ReferralWizard<'a> {
    pub fn new(recommender: &'a Recommender) -> Self {
        ReferralWizard {
            recommender,
            form: ReferralForm::default(),
            state: WizardState::CollectingInput,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn form(&self) -> &ReferralForm {
        &self.form
    }

    /// Edit the form; not possible once handed off
    pub fn form_mut(&mut self) -> Result<&mut ReferralForm> {
        if let WizardState::HandedOff { .. } = self.state {
            return Err(self.wrong_state("edit the form"));
        }
        Ok(&mut self.form)
    }

    /// Currently shown recommendations, if any
    pub fn recommendations(&self) -> &[ScoredFacility] {
        match &self.state {
            WizardState::RecommendationsShown { recommendations }
            | WizardState::FacilitySelected { recommendations, .. } => recommendations.as_slice(),
            _ => &[],
        }
    }

    /// Validate the form and rank facilities
    pub fn request_recommendations(&mut self) -> Result<&[ScoredFacility]> {
        if let WizardState::HandedOff { .. } = self.state {
            return Err(self.wrong_state("request recommendations"));
        }
        if let Err(e) = self.form.validate() {
            warn!(error = %e, "referral form incomplete");
            return Err(e);
        }

        let recommendations = self.recommender.recommend(
            &self.form.procedures,
            &self.form.diagnosis,
            &self.form.patient_address,
        );
        info!(count = recommendations.len(), "recommendations shown");
        self.state = WizardState::RecommendationsShown { recommendations };
        Ok(self.recommendations())
    }

    /// Choose one of the shown facilities, replacing any earlier choice
    pub fn select_facility(&mut self, facility_id: &str) -> Result<()> {
        let recommendations = match std::mem::replace(&mut self.state, WizardState::CollectingInput) {
            WizardState::RecommendationsShown { recommendations }
            | WizardState::FacilitySelected { recommendations, .. } => recommendations,
            other => {
                self.state = other;
                return Err(self.wrong_state("select a facility"));
            }
        };

        if !recommendations.iter().any(|r| r.facility.id == facility_id) {
            self.state = WizardState::RecommendationsShown { recommendations };
            return Err(ReferralError::UnknownFacility(facility_id.to_string()));
        }

        info!(facility = facility_id, "facility selected");
        self.state = WizardState::FacilitySelected {
            recommendations,
            facility_id: facility_id.to_string(),
        };
        Ok(())
    }

    /// Hand the referral off using the current time
    pub fn request_referral(&mut self) -> Result<TransferPackage> {
        self.request_referral_at(Utc::now())
    }

    /// Hand the referral off, stamping it with `now`
    pub fn request_referral_at(&mut self, now: DateTime<Utc>) -> Result<TransferPackage> {
        let (recommendations, facility_id) = match &self.state {
            WizardState::FacilitySelected { recommendations, facility_id } => (recommendations, facility_id),
            WizardState::RecommendationsShown { .. } => return Err(ReferralError::NoFacilitySelected),
            _ => return Err(self.wrong_state("request a referral")),
        };

        let selected = recommendations
            .iter()
            .find(|r| &r.facility.id == facility_id)
            .ok_or_else(|| ReferralError::UnknownFacility(facility_id.clone()))?;

        let notes = self.form.notes.trim();
        let package = TransferPackage {
            referral_id: referral_id_at(now),
            facility_id: selected.facility.id.clone(),
            facility_name: selected.facility.name.clone(),
            diagnosis: self.form.diagnosis.clone(),
            procedures: self.form.procedures.clone(),
            urgency: self.form.urgency,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            created_at: now,
        };
        info!(referral = %package.referral_id, facility = %package.facility_id, "referral handed off");

        self.state = WizardState::HandedOff {
            package: package.clone(),
        };
        Ok(package)
    }

    fn wrong_state(&self, action: &'static str) -> ReferralError {
        ReferralError::InvalidWizardState {
            action,
            state: self.state.name(),
        }
    }
}
