//! Receiving facilities
//!
//! A [`Facility`] is a read-only catalog entry: location, bed capacity,
//! congestion and the equipment it can operate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse occupancy/congestion indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrowdLevel {
    Low,
    Medium,
    High,
    /// Any label we do not recognize; scored like `Low`
    #[serde(other)]
    Unknown,
}

impl CrowdLevel {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdLevel::Low => "Low",
            CrowdLevel::Medium => "Medium",
            CrowdLevel::High => "High",
            CrowdLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hospital or clinic that can receive referrals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Distance from the reference point in kilometers
    pub distance: f64,
    /// Beds currently free
    pub available_beds: u32,
    /// Bed capacity
    pub total_beds: u32,
    /// Current congestion
    pub crowd_level: CrowdLevel,
    /// Equipment and procedures the facility can perform
    pub capabilities: Vec<String>,
    /// Medical specialties on staff
    pub specialties: Vec<String>,
    /// Referrals handled in the last 24 hours
    #[serde(default)]
    pub recent_activity: u32,
}

impl Facility {
    /// Fraction of beds that are free, 0.0 for a zero-capacity facility
    pub fn availability_ratio(&self) -> f64 {
        if self.total_beds == 0 {
            return 0.0;
        }
        self.available_beds as f64 / self.total_beds as f64
    }

    /// Percentage of beds in use, 0.0 for a zero-capacity facility
    pub fn occupancy_rate(&self) -> f64 {
        if self.total_beds == 0 {
            return 0.0;
        }
        let occupied = self.total_beds.saturating_sub(self.available_beds);
        occupied as f64 / self.total_beds as f64 * 100.0
    }

    /// Whether any capability contains `procedure`, ignoring case
    pub fn can_perform(&self, procedure: &str) -> bool {
        let needle = procedure.to_lowercase();
        self.capabilities
            .iter()
            .any(|cap| cap.to_lowercase().contains(&needle))
    }

    /// Whether the facility lists the specialty (exact match)
    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }

    /// Check the invariants a catalog entry must hold
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must not be empty".to_string());
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(format!(
                "distance must be a non-negative number, got {}",
                self.distance
            ));
        }
        if self.available_beds > self.total_beds {
            return Err(format!(
                "available beds ({}) exceed total beds ({})",
                self.available_beds, self.total_beds
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(available: u32, total: u32) -> Facility {
        Facility {
            id: "f-test".to_string(),
            name: "Test Hospital".to_string(),
            address: "1 Test Rd".to_string(),
            distance: 4.0,
            available_beds: available,
            total_beds: total,
            crowd_level: CrowdLevel::Medium,
            capabilities: vec!["CT Scan".to_string(), "MRI".to_string()],
            specialties: vec!["Cardiology".to_string()],
            recent_activity: 0,
        }
    }

    #[test]
    fn test_availability_ratio() {
        assert!((facility(15, 50).availability_ratio() - 0.3).abs() < 1e-12);
        assert_eq!(facility(0, 0).availability_ratio(), 0.0);
    }

    #[test]
    fn test_occupancy_rate() {
        assert!((facility(15, 50).occupancy_rate() - 70.0).abs() < 1e-9);
        assert_eq!(facility(0, 0).occupancy_rate(), 0.0);
    }

    #[test]
    fn test_can_perform_is_case_insensitive_substring() {
        let f = facility(1, 2);
        assert!(f.can_perform("ct scan"));
        assert!(f.can_perform("CT"));
        assert!(f.can_perform("mri"));
        assert!(!f.can_perform("MRI Scan"));
        assert!(!f.can_perform("Angiography"));
    }

    #[test]
    fn test_has_specialty_is_exact() {
        let f = facility(1, 2);
        assert!(f.has_specialty("Cardiology"));
        assert!(!f.has_specialty("cardiology"));
    }

    #[test]
    fn test_validate() {
        assert!(facility(10, 10).validate().is_ok());
        assert!(facility(11, 10).validate().is_err());

        let mut f = facility(1, 2);
        f.distance = -1.0;
        assert!(f.validate().is_err());
        f.distance = f64::NAN;
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_unknown_crowd_level_deserializes() {
        let json = r#"{
            "id": "x", "name": "X", "address": "Y", "distance": 1.0,
            "availableBeds": 1, "totalBeds": 2, "crowdLevel": "Extreme",
            "capabilities": [], "specialties": []
        }"#;
        let f: Facility = serde_json::from_str(json).unwrap();
        assert_eq!(f.crowd_level, CrowdLevel::Unknown);
        assert_eq!(f.recent_activity, 0);
    }
}
