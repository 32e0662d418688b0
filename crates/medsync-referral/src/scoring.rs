//! Facility scoring
//!
//! Four independent weighted components, summed and rounded:
//!
//! | Component    | Max | Rule                                               |
//! |--------------|-----|----------------------------------------------------|
//! | Distance     | 30  | `max(0, 30 - 2 * km)`                              |
//! | Availability | 25  | `25 * available / total` (0 when `total == 0`)     |
//! | Capability   | 30  | 30 if every procedure matches, else pro rata       |
//! | Crowd        | 15  | Low 15, Medium 10, High 5, unknown 15              |
//!
//! A required procedure matches when some capability contains it as a
//! case-insensitive substring. An empty procedure list is fully satisfied.

use crate::facility::{CrowdLevel, Facility};
use serde::{Deserialize, Serialize};

/// Maximum distance points
pub const DISTANCE_WEIGHT: f64 = 30.0;

/// Distance points lost per kilometer
pub const DISTANCE_DECAY_PER_KM: f64 = 2.0;

/// Maximum availability points
pub const AVAILABILITY_WEIGHT: f64 = 25.0;

/// Maximum capability points
pub const CAPABILITY_WEIGHT: f64 = 30.0;

/// Maximum crowd points
pub const CROWD_WEIGHT: f64 = 15.0;

/// Highest reachable score
pub const MAX_SCORE: u32 = 100;

/// Per-component contribution to a facility's score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance: f64,
    pub availability: f64,
    pub capability: f64,
    pub crowd: f64,
}

impl ScoreBreakdown {
    /// Compute every component for one facility
    pub fn compute<S: AsRef<str>>(facility: &Facility, required_procedures: &[S]) -> Self {
        ScoreBreakdown {
            distance: distance_component(facility.distance),
            availability: availability_component(facility.available_beds, facility.total_beds),
            capability: capability_component(facility, required_procedures),
            crowd: crowd_component(facility.crowd_level),
        }
    }

    /// Unrounded sum of the components
    pub fn total(&self) -> f64 {
        self.distance + self.availability + self.capability + self.crowd
    }

    /// Rounded score; halves round up since every component is non-negative
    pub fn score(&self) -> u32 {
        self.total().round() as u32
    }
}

/// Score a facility for a set of required procedures
///
/// `diagnosis` is accepted for interface symmetry and does not influence
/// the result.
pub fn score_facility<S: AsRef<str>>(
    facility: &Facility,
    required_procedures: &[S],
    _diagnosis: &str,
) -> u32 {
    ScoreBreakdown::compute(facility, required_procedures).score()
}

/// Linear decay, zero from 15 km onwards
pub fn distance_component(distance_km: f64) -> f64 {
    (DISTANCE_WEIGHT - distance_km * DISTANCE_DECAY_PER_KM).max(0.0)
}

/// Share of free beds scaled to 25
pub fn availability_component(available_beds: u32, total_beds: u32) -> f64 {
    if total_beds == 0 {
        return 0.0;
    }
    AVAILABILITY_WEIGHT * available_beds as f64 / total_beds as f64
}

/// Full credit when every procedure matches, otherwise proportional credit
pub fn capability_component<S: AsRef<str>>(facility: &Facility, required_procedures: &[S]) -> f64 {
    let total = required_procedures.len();
    let matched = matched_procedure_count(facility, required_procedures);
    if matched == total {
        return CAPABILITY_WEIGHT;
    }
    CAPABILITY_WEIGHT * matched as f64 / total as f64
}

/// Congestion points
pub fn crowd_component(level: CrowdLevel) -> f64 {
    match level {
        CrowdLevel::Low => 15.0,
        CrowdLevel::Medium => 10.0,
        CrowdLevel::High => 5.0,
        CrowdLevel::Unknown => CROWD_WEIGHT,
    }
}

/// How many required procedures the facility can perform
pub fn matched_procedure_count<S: AsRef<str>>(facility: &Facility, required_procedures: &[S]) -> usize {
    required_procedures
        .iter()
        .filter(|proc| facility.can_perform(proc.as_ref()))
        .count()
}

/// Whether every required procedure is available (vacuously true)
pub fn has_all_capabilities<S: AsRef<str>>(facility: &Facility, required_procedures: &[S]) -> bool {
    required_procedures
        .iter()
        .all(|proc| facility.can_perform(proc.as_ref()))
}
