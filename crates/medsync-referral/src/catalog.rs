//! Facility catalog
//!
//! An immutable, validated set of facilities. The catalog is built once and
//! handed to a [`Recommender`](crate::Recommender); nothing mutates it
//! afterwards, so it can be shared freely between callers.

use crate::error::{ReferralError, Result};
use crate::facility::Facility;
use crate::mock_data;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read-only collection of receiving facilities in catalog order
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityCatalog {
    facilities: Vec<Facility>,
}

impl FacilityCatalog {
    /// Build a catalog, validating every entry
    pub fn new(facilities: Vec<Facility>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(facilities.len());
        for facility in &facilities {
            facility
                .validate()
                .map_err(|reason| ReferralError::InvalidFacility {
                    id: facility.id.clone(),
                    reason,
                })?;
            if !seen.insert(facility.id.as_str()) {
                return Err(ReferralError::DuplicateFacility(facility.id.clone()));
            }
        }
        Ok(FacilityCatalog { facilities })
    }

    /// The built-in five-facility demo catalog
    pub fn builtin() -> Self {
        FacilityCatalog {
            facilities: mock_data::facilities(),
        }
    }

    /// Parse a JSON array of facilities
    pub fn from_json_str(json: &str) -> Result<Self> {
        let facilities: Vec<Facility> = serde_json::from_str(json)?;
        Self::new(facilities)
    }

    /// Load a JSON catalog file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        debug!(path = %path.display(), facilities = catalog.len(), "loaded facility catalog");
        Ok(catalog)
    }

    /// Look up a facility by id
    pub fn get(&self, id: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.id == id)
    }

    /// Number of facilities
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    /// All facilities as a slice
    pub fn as_slice(&self) -> &[Facility] {
        &self.facilities
    }
}

impl Default for FacilityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
