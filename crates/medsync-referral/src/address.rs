//! Province → city → district address hierarchy
//!
//! Backs the cascading address picker of the referral form. Unknown ids
//! resolve to empty lists rather than errors.

use crate::mock_data;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub districts: Vec<District>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
    pub cities: Vec<City>,
}

/// Lookup over a fixed set of provinces
#[derive(Debug, Clone)]
pub struct AddressBook {
    provinces: Vec<Province>,
}

impl AddressBook {
    pub fn new(provinces: Vec<Province>) -> Self {
        AddressBook { provinces }
    }

    /// Built-in hierarchy
    pub fn builtin() -> Self {
        Self::new(mock_data::provinces())
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn cities_of(&self, province_id: &str) -> &[City] {
        self.provinces
            .iter()
            .find(|p| p.id == province_id)
            .map(|p| p.cities.as_slice())
            .unwrap_or(&[])
    }

    pub fn districts_of(&self, province_id: &str, city_id: &str) -> &[District] {
        self.cities_of(province_id)
            .iter()
            .find(|c| c.id == city_id)
            .map(|c| c.districts.as_slice())
            .unwrap_or(&[])
    }

    /// "District, City, Province" for a complete selection
    pub fn format(&self, province_id: &str, city_id: &str, district_id: &str) -> Option<String> {
        let province = self.provinces.iter().find(|p| p.id == province_id)?;
        let city = province.cities.iter().find(|c| c.id == city_id)?;
        let district = city.districts.iter().find(|d| d.id == district_id)?;
        Some(format!("{}, {}, {}", district.name, city.name, province.name))
    }
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let book = AddressBook::builtin();
        assert_eq!(book.provinces().len(), 2);

        let cities: usize = book.provinces().iter().map(|p| p.cities.len()).sum();
        let districts: usize = book
            .provinces()
            .iter()
            .flat_map(|p| p.cities.iter())
            .map(|c| c.districts.len())
            .sum();
        assert_eq!(cities, 4);
        assert_eq!(districts, 11);
    }

    #[test]
    fn test_cascading_lookup() {
        let book = AddressBook::builtin();
        let names: Vec<&str> = book
            .districts_of("jawa_barat", "bekasi")
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bekasi Timur", "Bekasi Barat"]);

        assert!(book.cities_of("bali").is_empty());
        // City exists, but under another province
        assert!(book.districts_of("dki_jakarta", "bandung").is_empty());
    }

    #[test]
    fn test_format() {
        let book = AddressBook::builtin();
        assert_eq!(
            book.format("dki_jakarta", "jakarta_pusat", "gambir").as_deref(),
            Some("Gambir, Jakarta Pusat, DKI Jakarta")
        );
        assert_eq!(book.format("dki_jakarta", "jakarta_pusat", "coblong"), None);
    }
}
