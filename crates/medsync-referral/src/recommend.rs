//! Facility recommendation
//!
//! Scores every catalog facility for a referral query, attaches short
//! justification strings and returns the best candidates.

use crate::catalog::FacilityCatalog;
use crate::facility::{CrowdLevel, Facility};
use crate::scoring::{has_all_capabilities, ScoreBreakdown};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Default number of recommendations returned
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Distance (km) at or under which a facility counts as close
pub const CLOSE_PROXIMITY_KM: f64 = 5.0;

/// Free-bed ratio above which a facility counts as highly available
pub const HIGH_AVAILABILITY_RATIO: f64 = 0.3;

/// Why a facility was recommended, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reason {
    CloseProximity,
    HighAvailability,
    LowCrowdLevel,
    HasAllRequiredEquipment,
}

impl Reason {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Reason::CloseProximity => "Close proximity",
            Reason::HighAvailability => "High availability",
            Reason::LowCrowdLevel => "Low crowd level",
            Reason::HasAllRequiredEquipment => "Has all required equipment",
        }
    }

    /// Reasons that apply to a facility, in fixed order
    pub fn for_facility<S: AsRef<str>>(facility: &Facility, required_procedures: &[S]) -> Vec<Reason> {
        let mut reasons = Vec::new();
        if facility.distance <= CLOSE_PROXIMITY_KM {
            reasons.push(Reason::CloseProximity);
        }
        if facility.availability_ratio() > HIGH_AVAILABILITY_RATIO {
            reasons.push(Reason::HighAvailability);
        }
        if facility.crowd_level == CrowdLevel::Low {
            reasons.push(Reason::LowCrowdLevel);
        }
        if has_all_capabilities(facility, required_procedures) {
            reasons.push(Reason::HasAllRequiredEquipment);
        }
        reasons
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// What the referring clinician is looking for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferralQuery {
    /// Procedures the receiving facility must perform
    pub required_procedures: Vec<String>,
    /// Primary diagnosis (not scored)
    pub diagnosis: String,
    /// Patient's residential address (not scored)
    pub patient_address: String,
}

/// A facility with its score and justification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFacility {
    #[serde(flatten)]
    pub facility: Facility,
    /// Rounded total, 0-100
    pub score: u32,
    /// Applicable reasons, in display order
    pub reasons: Vec<Reason>,
    /// Component values behind `score`
    pub breakdown: ScoreBreakdown,
}

impl ScoredFacility {
    /// Score one facility
    pub fn evaluate<S: AsRef<str>>(facility: &Facility, required_procedures: &[S]) -> Self {
        let breakdown = ScoreBreakdown::compute(facility, required_procedures);
        ScoredFacility {
            facility: facility.clone(),
            score: breakdown.score(),
            reasons: Reason::for_facility(facility, required_procedures),
            breakdown,
        }
    }

    /// Reason labels as strings
    pub fn reason_labels(&self) -> Vec<&'static str> {
        self.reasons.iter().map(Reason::label).collect()
    }
}

/// Ranks catalog facilities for referral queries
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: FacilityCatalog,
    max_results: usize,
}

impl Recommender {
    /// Create a recommender returning up to [`DEFAULT_MAX_RESULTS`] entries
    pub fn new(catalog: FacilityCatalog) -> Self {
        Recommender {
            catalog,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Change how many entries a recommendation returns
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// The catalog being ranked
    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    /// Upper bound on returned entries
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Rank the catalog for the given needs
    ///
    /// Results are sorted by score, highest first; equal scores keep catalog
    /// order. `diagnosis` and `patient_address` are accepted but do not
    /// affect the ranking.
    pub fn recommend<S: AsRef<str>>(
        &self,
        required_procedures: &[S],
        diagnosis: &str,
        patient_address: &str,
    ) -> Vec<ScoredFacility> {
        debug!(
            procedures = required_procedures.len(),
            diagnosis,
            patient_address,
            "ranking {} facilities",
            self.catalog.len()
        );

        let mut scored: Vec<ScoredFacility> = self
            .catalog
            .iter()
            .map(|facility| {
                let entry = ScoredFacility::evaluate(facility, required_procedures);
                debug!(facility = %facility.id, score = entry.score, "scored facility");
                entry
            })
            .collect();

        // Vec::sort_by is stable, so ties stay in catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.max_results);
        scored
    }

    /// Rank the catalog for a query
    pub fn recommend_query(&self, query: &ReferralQuery) -> Vec<ScoredFacility> {
        self.recommend(
            &query.required_procedures,
            &query.diagnosis,
            &query.patient_address,
        )
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(FacilityCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;

    fn ids(results: &[ScoredFacility]) -> Vec<&str> {
        results.iter().map(|r| r.facility.id.as_str()).collect()
    }

    #[test]
    fn test_cardiac_ranking() {
        let recommender = Recommender::default();
        let results = recommender.recommend(&["Angiography", "ECG"], "Cardiac Arrest", "142 Pine St");

        assert_eq!(results.len(), 5);
        assert_eq!(ids(&results), vec!["f1", "f3", "f2", "f5", "f4"]);

        let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![63, 63, 62, 53, 47]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let recommender = Recommender::default();
        let results = recommender.recommend(&["Angiography", "ECG"], "", "");

        // f1 and f3 both score 63; f1 comes first in the catalog
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].facility.id, "f1");
        assert_eq!(results[1].facility.id, "f3");
    }

    #[test]
    fn test_reasons() {
        let recommender = Recommender::default();
        let results = recommender.recommend(&["Angiography", "ECG"], "", "");
        let by_id = |id: &str| results.iter().find(|r| r.facility.id == id).unwrap();

        // 15/50 is exactly 0.3, which is not above the threshold
        assert_eq!(by_id("f1").reason_labels(), vec!["Close proximity", "Low crowd level"]);
        assert_eq!(by_id("f2").reason_labels(), vec!["Has all required equipment"]);
        assert_eq!(
            by_id("f3").reason_labels(),
            vec!["Low crowd level", "Has all required equipment"]
        );
        assert_eq!(by_id("f4").reason_labels(), vec!["Close proximity"]);
        assert_eq!(by_id("f5").reason_labels(), vec!["Has all required equipment"]);
    }

    #[test]
    fn test_high_availability_reason() {
        let mut f = mock_data::facilities().remove(0);
        f.available_beds = 16;
        let reasons = Reason::for_facility(&f, &["MRI"]);
        assert_eq!(
            reasons,
            vec![
                Reason::CloseProximity,
                Reason::HighAvailability,
                Reason::LowCrowdLevel,
                Reason::HasAllRequiredEquipment,
            ]
        );

        f.available_beds = 0;
        f.total_beds = 0;
        assert!(!Reason::for_facility(&f, &["MRI"]).contains(&Reason::HighAvailability));
    }

    #[test]
    fn test_equipment_reason_matches_full_capability() {
        let recommender = Recommender::default();
        for result in recommender.recommend(&["PET Scan", "CT"], "", "") {
            let full = result.breakdown.capability == crate::scoring::CAPABILITY_WEIGHT;
            assert_eq!(full, result.reasons.contains(&Reason::HasAllRequiredEquipment));
        }
    }

    #[test]
    fn test_truncates_to_max_results() {
        let recommender = Recommender::default().with_max_results(2);
        let results = recommender.recommend(&["MRI"], "", "");
        assert_eq!(ids(&results), vec!["f1", "f3"]);
    }

    #[test]
    fn test_small_catalog_returns_everything() {
        let catalog = FacilityCatalog::new(mock_data::facilities().into_iter().take(3).collect()).unwrap();
        let results = Recommender::new(catalog).recommend(&["MRI"], "", "");
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_empty_procedures_still_ranked() {
        let none: [&str; 0] = [];
        let results = Recommender::default().recommend(&none, "", "");
        assert_eq!(results.len(), 5);
        assert!(results
            .iter()
            .all(|r| r.reasons.contains(&Reason::HasAllRequiredEquipment)));
    }

    #[test]
    fn test_query_matches_direct_call() {
        let recommender = Recommender::default();
        let query = ReferralQuery {
            required_procedures: vec!["CT Scan".to_string(), "Surgery".to_string()],
            diagnosis: "Appendicitis".to_string(),
            patient_address: "789 Oak Ave".to_string(),
        };
        assert_eq!(
            recommender.recommend_query(&query),
            recommender.recommend(&["CT Scan", "Surgery"], "Appendicitis", "789 Oak Ave")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let results = Recommender::default().recommend(&["MRI"], "", "");
        let json = serde_json::to_value(&results[0]).unwrap();

        assert_eq!(json["id"], "f1");
        assert_eq!(json["availableBeds"], 15);
        assert_eq!(json["score"], 78);
        assert_eq!(json["reasons"][0], "Close proximity");
    }
}
