//! Doctor records and the built-in specialist directory

use serde::{Deserialize, Serialize};

/// A specialist directory entry
///
/// Static and read-only; the directory is supplied at construction and
/// never modified by a deliberation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub hospital: String,
    pub contact: String,
    pub email: String,
    pub availability: String,
}

impl Doctor {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        specialty: impl Into<String>,
        hospital: impl Into<String>,
        contact: impl Into<String>,
        email: impl Into<String>,
        availability: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            specialty: specialty.into(),
            hospital: hospital.into(),
            contact: contact.into(),
            email: email.into(),
            availability: availability.into(),
        }
    }
}

/// The built-in specialist directory, in referral order
pub fn default_directory() -> Vec<Doctor> {
    vec![
        Doctor::new(
            1,
            "Dr. Sarah Chen",
            "Cardiology",
            "City General Hospital",
            "+1 (555) 012-3456",
            "dr.chen@citygeneral.org",
            "On Call",
        ),
        Doctor::new(
            2,
            "Dr. Michael Ross",
            "Neurology",
            "Neuroscience Institute",
            "+1 (555) 012-7890",
            "m.ross@neuro.inst.com",
            "Available",
        ),
        Doctor::new(
            3,
            "Dr. Emily Watson",
            "General Practice / Internal Medicine",
            "Community Health Clinic",
            "+1 (555) 013-4567",
            "e.watson@communityhealth.org",
            "Available",
        ),
        Doctor::new(
            4,
            "Dr. James Wilson",
            "Pulmonology",
            "Respiratory Care Center",
            "+1 (555) 014-9876",
            "j.wilson@respiratory.care",
            "Away",
        ),
        Doctor::new(
            5,
            "Dr. Lisa Cuddy",
            "Endocrinology",
            "Princeton Plainsboro",
            "+1 (555) 015-6543",
            "l.cuddy@ppth.org",
            "Available",
        ),
    ]
}
