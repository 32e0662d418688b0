//! Error types for the referral toolkit
//!
//! Scoring and ranking never fail; everything around them (catalog
//! loading, configuration, the referral wizard and referral review)
//! reports problems through [`ReferralError`].

use crate::referral::ReferralStatus;
use thiserror::Error;

/// Errors that can occur outside the pure scoring path
#[derive(Debug, Error)]
pub enum ReferralError {
    /// A catalog entry violates a facility invariant
    #[error("Invalid facility {id}: {reason}")]
    InvalidFacility { id: String, reason: String },

    /// Two catalog entries share an id
    #[error("Duplicate facility id: {0}")]
    DuplicateFacility(String),

    /// Catalog file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON for the facility shape
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be assembled
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Wizard was asked for recommendations without a diagnosis
    #[error("A primary diagnosis is required")]
    MissingDiagnosis,

    /// Wizard was asked for recommendations without any procedure
    #[error("Select at least one required procedure")]
    NoProceduresSelected,

    /// Referral requested before a facility was chosen
    #[error("No facility selected")]
    NoFacilitySelected,

    /// Facility id is not among the shown recommendations or the catalog
    #[error("Unknown facility: {0}")]
    UnknownFacility(String),

    /// Wizard operation called from the wrong step
    #[error("Cannot {action} while {state}")]
    InvalidWizardState {
        action: &'static str,
        state: &'static str,
    },

    /// No referral with this id
    #[error("Referral not found: {0}")]
    ReferralNotFound(String),

    /// Review action not allowed from the referral's current status
    #[error("Cannot move referral from {from} to {to}")]
    InvalidTransition {
        from: ReferralStatus,
        to: ReferralStatus,
    },
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ReferralError>;
