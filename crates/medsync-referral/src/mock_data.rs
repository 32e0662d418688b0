//! Built-in demo data set
//!
//! Facilities, doctors, referral requests and reference lists used by
//! [`FacilityCatalog::builtin`](crate::FacilityCatalog::builtin) and the CLI
//! when no catalog file is configured.

use crate::address::{City, District, Province};
use crate::facility::{CrowdLevel, Facility};
use crate::referral::{ReferralRequest, ReferralStatus, Urgency};
use crate::schedule::{Doctor, Weekday};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Procedures offered in the referral form
pub const MEDICAL_PROCEDURES: [&str; 12] = [
    "MRI Scan",
    "CT Scan",
    "X-Ray",
    "Ultrasound",
    "ECG",
    "Angiography",
    "PET Scan",
    "Blood Test",
    "Surgery",
    "Endoscopy",
    "Biopsy",
    "Dialysis",
];

/// Diagnoses offered in the referral form
pub const COMMON_DIAGNOSES: [&str; 12] = [
    "Cardiac Arrest",
    "Appendicitis",
    "Pneumonia",
    "Stroke",
    "Heart Attack",
    "Diabetes Emergency",
    "Severe Asthma",
    "Kidney Stones",
    "Fracture",
    "Severe Allergic Reaction",
    "Internal Bleeding",
    "Seizure Disorder",
];

/// Patient data categories that can accompany a referral
pub const PATIENT_DATA_CATEGORIES: [&str; 8] = [
    "Patient Vitals",
    "Medical History",
    "Lab Results",
    "Doctor's Notes",
    "Medication List",
    "Allergy Information",
    "Emergency Contacts",
    "Insurance Information",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn facility(
    id: &str,
    name: &str,
    address: &str,
    distance: f64,
    available_beds: u32,
    total_beds: u32,
    crowd_level: CrowdLevel,
    capabilities: &[&str],
    specialties: &[&str],
    recent_activity: u32,
) -> Facility {
    Facility {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        distance,
        available_beds,
        total_beds,
        crowd_level,
        capabilities: strings(capabilities),
        specialties: strings(specialties),
        recent_activity,
    }
}

/// The five demo facilities, in catalog order
pub fn facilities() -> Vec<Facility> {
    vec![
        facility(
            "f1",
            "St. Mary's General Hospital",
            "123 Healthcare Ave, Medical District",
            2.5,
            15,
            50,
            CrowdLevel::Low,
            &["MRI", "CT Scan", "X-Ray", "Ultrasound", "ECG"],
            &["Cardiology", "Neurology", "Emergency Medicine", "Surgery"],
            25,
        ),
        facility(
            "f2",
            "Metropolitan Medical Center",
            "456 Main St, Downtown",
            5.2,
            8,
            75,
            CrowdLevel::Medium,
            &["MRI", "CT Scan", "X-Ray", "Ultrasound", "ECG", "Angiography"],
            &["Cardiology", "Oncology", "Orthopedics", "Emergency Medicine"],
            42,
        ),
        facility(
            "f3",
            "University Teaching Hospital",
            "789 University Blvd, Academic Quarter",
            8.1,
            22,
            120,
            CrowdLevel::Low,
            &["MRI", "CT Scan", "X-Ray", "Ultrasound", "ECG", "Angiography", "PET Scan"],
            &["Cardiology", "Neurology", "Oncology", "Pediatrics", "Surgery", "Research"],
            31,
        ),
        facility(
            "f4",
            "City Emergency Center",
            "321 Emergency Way, Central",
            3.8,
            5,
            30,
            CrowdLevel::High,
            &["X-Ray", "Ultrasound", "ECG", "Basic Surgery"],
            &["Emergency Medicine", "Trauma", "Critical Care"],
            58,
        ),
        facility(
            "f5",
            "Regional Specialty Institute",
            "654 Specialist Dr, Medical Campus",
            12.3,
            18,
            60,
            CrowdLevel::Medium,
            &[
                "MRI",
                "CT Scan",
                "X-Ray",
                "Ultrasound",
                "ECG",
                "Angiography",
                "PET Scan",
                "Advanced Surgery",
            ],
            &["Cardiology", "Neurosurgery", "Oncology", "Transplant", "Research"],
            29,
        ),
    ]
}

fn doctor(id: &str, name: &str, specialty: &str, shifts: &[(Weekday, &str)]) -> Doctor {
    let schedule: BTreeMap<Weekday, String> = shifts
        .iter()
        .map(|(day, shift)| (*day, shift.to_string()))
        .collect();
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        schedule,
    }
}

/// On-duty specialists, grouped by specialty
pub fn doctors() -> Vec<Doctor> {
    use Weekday::*;

    vec![
        // Cardiology
        doctor("d1", "Dr. Emily Carter", "Cardiology", &[(Monday, "9am - 5pm"), (Wednesday, "10am - 6pm"), (Friday, "8am - 4pm")]),
        doctor("d5", "Dr. Johnathan Lee", "Cardiology", &[(Tuesday, "9am - 5pm"), (Thursday, "10am - 6pm"), (Saturday, "9am - 1pm")]),
        doctor("d6", "Dr. Sophia Garcia", "Cardiology", &[(Monday, "8am - 4pm"), (Wednesday, "9am - 5pm"), (Friday, "10am - 6pm")]),
        doctor("d7", "Dr. Michael Brown", "Cardiology", &[(Tuesday, "10am - 6pm"), (Thursday, "8am - 4pm")]),
        // Neurology
        doctor("d2", "Dr. Ben Adams", "Neurology", &[(Tuesday, "8am - 4pm"), (Thursday, "11am - 7pm")]),
        doctor("d8", "Dr. Chloe Kim", "Neurology", &[(Monday, "10am - 6pm"), (Wednesday, "8am - 4pm"), (Friday, "9am - 5pm")]),
        doctor("d9", "Dr. David Martinez", "Neurology", &[(Monday, "9am - 5pm"), (Thursday, "9am - 5pm")]),
        doctor("d10", "Dr. Laura Wilson", "Neurology", &[(Wednesday, "10am - 6pm"), (Friday, "8am - 4pm")]),
        // Emergency Medicine
        doctor("d3", "Dr. Olivia Chen", "Emergency Medicine", &[(Monday, "2pm - 10pm"), (Tuesday, "2pm - 10pm"), (Friday, "6pm - 2am"), (Saturday, "6pm - 2am")]),
        doctor("d11", "Dr. Daniel Taylor", "Emergency Medicine", &[(Wednesday, "10pm - 6am"), (Thursday, "10pm - 6am"), (Sunday, "8pm - 4am")]),
        doctor("d12", "Dr. Hannah Wright", "Emergency Medicine", &[(Monday, "6am - 2pm"), (Tuesday, "6am - 2pm"), (Saturday, "8am - 4pm")]),
        doctor("d13", "Dr. Chris Evans", "Emergency Medicine", &[(Wednesday, "8am - 8pm"), (Sunday, "8am - 8pm")]),
        // Orthopedics
        doctor("d4", "Dr. James Rodriguez", "Orthopedics", &[(Monday, "9am - 5pm"), (Tuesday, "9am - 1pm (Surgery)"), (Thursday, "9am - 5pm")]),
        doctor("d14", "Dr. Jessica Miller", "Orthopedics", &[(Wednesday, "8am - 4pm"), (Friday, "9am - 5pm")]),
        doctor("d15", "Dr. Brian Clark", "Orthopedics", &[(Tuesday, "1pm - 7pm"), (Thursday, "8am - 12pm (Surgery)")]),
        doctor("d16", "Dr. Sarah Davis", "Orthopedics", &[(Monday, "10am - 6pm"), (Friday, "10am - 6pm")]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn referral(
    id: &str,
    patient_id: &str,
    from: &str,
    to: &str,
    diagnosis: &str,
    procedures: &[&str],
    urgency: Urgency,
    status: ReferralStatus,
    selected_data: &[&str],
    created_at: DateTime<Utc>,
) -> ReferralRequest {
    ReferralRequest {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        from_facility: from.to_string(),
        to_facility: to.to_string(),
        diagnosis: diagnosis.to_string(),
        required_procedures: strings(procedures),
        urgency,
        status,
        selected_data: strings(selected_data),
        created_at,
        notes: None,
        rejection_reason: None,
    }
}

/// Demo referral requests, timestamped relative to `now`
pub fn referrals(now: DateTime<Utc>) -> Vec<ReferralRequest> {
    let mut r1 = referral(
        "r1",
        "p1",
        "Community Health Clinic",
        "St. Mary's General Hospital",
        "Cardiac Arrest",
        &["Angiography", "ECG"],
        Urgency::High,
        ReferralStatus::Pending,
        &["Patient Vitals", "Medical History", "Lab Results", "Doctor's Notes"],
        now - Duration::minutes(30),
    );
    r1.notes = Some("Urgent cardiac case requiring immediate attention".to_string());

    let mut r5 = referral(
        "r5",
        "p1",
        "St. Mary's General Hospital",
        "City Emergency Center",
        "Trauma Care",
        &["X-Ray"],
        Urgency::High,
        ReferralStatus::Rejected,
        &["Patient Vitals", "Doctor's Notes"],
        now - Duration::days(3),
    );
    r5.rejection_reason = Some("Facility at full capacity".to_string());

    vec![
        r1,
        referral(
            "r2",
            "p2",
            "Downtown Urgent Care",
            "Metropolitan Medical Center",
            "Appendicitis",
            &["CT Scan", "Surgery"],
            Urgency::High,
            ReferralStatus::Approved,
            &["Patient Vitals", "Lab Results", "Doctor's Notes"],
            now - Duration::hours(2),
        ),
        referral(
            "r3",
            "p1",
            "St. Mary's General Hospital",
            "Metropolitan Medical Center",
            "Follow-up Consultation",
            &["Cardiology"],
            Urgency::Medium,
            ReferralStatus::Completed,
            &["Medical History", "Doctor's Notes"],
            now - Duration::days(1),
        ),
        referral(
            "r4",
            "p2",
            "St. Mary's General Hospital",
            "University Teaching Hospital",
            "Specialist Evaluation",
            &["Neurology"],
            Urgency::Low,
            ReferralStatus::Approved,
            &["Medical History", "Lab Results"],
            now - Duration::days(2),
        ),
        r5,
        referral(
            "r6",
            "p2",
            "St. Mary's General Hospital",
            "Regional Specialty Institute",
            "Oncology Consultation",
            &["PET Scan"],
            Urgency::Medium,
            ReferralStatus::Completed,
            &["Medical History", "Lab Results", "Doctor's Notes"],
            now - Duration::days(5),
        ),
    ]
}

fn city(id: &str, name: &str, districts: &[(&str, &str)]) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        districts: districts
            .iter()
            .map(|(id, name)| District {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
    }
}

/// Province → city → district hierarchy used by the address picker
pub fn provinces() -> Vec<Province> {
    vec![
        Province {
            id: "dki_jakarta".to_string(),
            name: "DKI Jakarta".to_string(),
            cities: vec![
                city(
                    "jakarta_pusat",
                    "Jakarta Pusat",
                    &[("gambir", "Gambir"), ("sawah_besar", "Sawah Besar"), ("kemayoran", "Kemayoran")],
                ),
                city(
                    "jakarta_barat",
                    "Jakarta Barat",
                    &[
                        ("cengkareng", "Cengkareng"),
                        ("grogol_petamburan", "Grogol Petamburan"),
                        ("taman_sari", "Taman Sari"),
                    ],
                ),
            ],
        },
        Province {
            id: "jawa_barat".to_string(),
            name: "Jawa Barat".to_string(),
            cities: vec![
                city(
                    "bandung",
                    "Bandung",
                    &[("sukajadi", "Sukajadi"), ("sumur_bandung", "Sumur Bandung"), ("coblong", "Coblong")],
                ),
                city(
                    "bekasi",
                    "Bekasi",
                    &[("bekasi_timur", "Bekasi Timur"), ("bekasi_barat", "Bekasi Barat")],
                ),
            ],
        },
    ]
}
