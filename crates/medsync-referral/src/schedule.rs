//! Doctor on-duty schedules

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Filter value that matches every specialty
pub const ALL_SPECIALTIES: &str = "All";

/// Day of the week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Sunday
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialist and the shifts they work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// Free-text shift per working day, e.g. "9am - 5pm"
    pub schedule: BTreeMap<Weekday, String>,
}

impl Doctor {
    /// Shift on a given day, if the doctor works it
    pub fn shift_on(&self, day: Weekday) -> Option<&str> {
        self.schedule.get(&day).map(String::as_str)
    }

    /// Days with a shift, Monday first
    pub fn working_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.schedule.keys().copied()
    }
}

/// Lookup over a fixed roster of doctors
#[derive(Debug, Clone, Default)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        DoctorDirectory { doctors }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Filter options: "All" followed by each specialty in first-seen order
    pub fn specialties(&self) -> Vec<&str> {
        let mut options = vec![ALL_SPECIALTIES];
        for doctor in &self.doctors {
            if !options.contains(&doctor.specialty.as_str()) {
                options.push(&doctor.specialty);
            }
        }
        options
    }

    /// Doctors of a specialty, or everyone for "All"
    pub fn filter_by_specialty(&self, specialty: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| specialty == ALL_SPECIALTIES || d.specialty == specialty)
            .collect()
    }

    /// Doctors with a shift on the given day
    pub fn on_duty(&self, day: Weekday) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.shift_on(day).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;

    fn directory() -> DoctorDirectory {
        DoctorDirectory::new(mock_data::doctors())
    }

    #[test]
    fn test_specialty_options() {
        assert_eq!(
            directory().specialties(),
            vec!["All", "Cardiology", "Neurology", "Emergency Medicine", "Orthopedics"]
        );
    }

    #[test]
    fn test_filter_by_specialty() {
        let dir = directory();
        assert_eq!(dir.filter_by_specialty("All").len(), 16);

        let neuro = dir.filter_by_specialty("Neurology");
        assert_eq!(neuro.len(), 4);
        assert!(neuro.iter().all(|d| d.specialty == "Neurology"));

        assert!(dir.filter_by_specialty("Dermatology").is_empty());
    }

    #[test]
    fn test_shift_lookup() {
        let dir = directory();
        let carter = &dir.doctors()[0];
        assert_eq!(carter.shift_on(Weekday::Monday), Some("9am - 5pm"));
        assert_eq!(carter.shift_on(Weekday::Tuesday), None);
        assert_eq!(
            carter.working_days().collect::<Vec<_>>(),
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
        );
    }

    #[test]
    fn test_on_duty_sunday() {
        let names: Vec<_> = directory()
            .on_duty(Weekday::Sunday)
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec!["Dr. Daniel Taylor", "Dr. Chris Evans"]);
    }
}
