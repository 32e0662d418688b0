//! MedSync Referral - facility recommendation for patient referrals
//!
//! Ranks receiving facilities for a referral and models the surrounding
//! referral workflow as plain in-memory data.
//!
//! # Features
//!
//! - Weighted facility scoring (distance, bed availability, equipment, crowding)
//! - Top-N recommendations with human-readable reasons
//! - Referral review lifecycle and dashboard grouping
//! - New-referral wizard state machine with handoff package
//! - Doctor on-duty schedules and system statistics
//!
//! # Example
//!
//! ```rust
//! use medsync_referral::{FacilityCatalog, Recommender};
//!
//! let recommender = Recommender::new(FacilityCatalog::builtin());
//! let ranked = recommender.recommend(&["Angiography", "ECG"], "Cardiac Arrest", "142 Pine St");
//!
//! assert_eq!(ranked[0].facility.name, "St. Mary's General Hospital");
//! assert_eq!(ranked[0].score, 63);
//! ```
//!
//! # Known limitation
//!
//! `diagnosis` and `patient_address` are accepted by the recommender but do
//! not influence scores.

pub mod address;
pub mod catalog;
pub mod error;
pub mod facility;
pub mod mock_data;
pub mod recommend;
pub mod referral;
pub mod schedule;
pub mod scoring;
pub mod settings;
pub mod stats;
pub mod workflow;

// Re-export commonly used types for convenience
pub use address::{AddressBook, City, District, Province};
pub use catalog::FacilityCatalog;
pub use settings::Settings;
pub use error::{ReferralError, Result};
pub use facility::{CrowdLevel, Facility};
pub use recommend::{Reason, Recommender, ReferralQuery, ScoredFacility, DEFAULT_MAX_RESULTS};
pub use referral::{Dashboard, ReferralBook, ReferralRequest, ReferralStatus, Urgency};
pub use schedule::{Doctor, DoctorDirectory, Weekday};
pub use scoring::{score_facility, ScoreBreakdown};
pub use stats::{busiest_facilities, SystemStats};
pub use workflow::{ReferralForm, ReferralWizard, TransferPackage, WizardState};
