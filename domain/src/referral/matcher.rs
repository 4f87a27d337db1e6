//! Keyword-driven referral matching
//!
//! Deterministic given a fixed directory and keyword table: identical
//! inputs always produce the identical, order-stable doctor list.

use crate::deliberation::gate::FinalDecision;
use crate::referral::doctor::Doctor;
use std::collections::BTreeSet;

/// Fallback specialty added for consultations and unmatched symptoms
pub const GENERAL_PRACTICE: &str = "General Practice / Internal Medicine";

/// Symptom keyword to specialty table.
///
/// Matching is case-insensitive substring search, so "breath" also
/// catches "breathless" and "shortness of breath".
const KEYWORD_TABLE: [(&str, &str); 11] = [
    ("heart", "Cardiology"),
    ("chest", "Cardiology"),
    ("palpitation", "Cardiology"),
    ("headache", "Neurology"),
    ("dizzy", "Neurology"),
    ("numb", "Neurology"),
    ("breath", "Pulmonology"),
    ("cough", "Pulmonology"),
    ("lung", "Pulmonology"),
    ("sugar", "Endocrinology"),
    ("thirst", "Endocrinology"),
];

/// Match the decision and symptom text to at most three specialists.
///
/// Only `Consult` and `Urgent` outcomes get referrals; everything else
/// returns an empty list. Selection preserves directory order, pads to at
/// least two entries when the directory allows, and never exceeds three.
///
/// # Example
///
/// ```
/// use triage_domain::{FinalDecision, default_directory, recommend};
///
/// let doctors = recommend(
///     FinalDecision::Urgent,
///     "Crushing chest pain",
///     &default_directory(),
/// );
/// assert!(doctors.iter().any(|d| d.specialty == "Cardiology"));
/// assert!(doctors.len() <= 3);
/// ```
pub fn recommend(decision: FinalDecision, symptoms: &str, directory: &[Doctor]) -> Vec<Doctor> {
    if !decision.needs_referral() {
        return Vec::new();
    }

    let symptoms_lower = symptoms.to_lowercase();
    let mut specialties: BTreeSet<&str> = KEYWORD_TABLE
        .iter()
        .filter(|(keyword, _)| symptoms_lower.contains(keyword))
        .map(|(_, specialty)| *specialty)
        .collect();

    if specialties.is_empty() || decision == FinalDecision::Consult {
        specialties.insert(GENERAL_PRACTICE);
    }

    let mut selected: Vec<Doctor> = directory
        .iter()
        .filter(|doc| specialties.contains(doc.specialty.as_str()))
        .cloned()
        .collect();

    // Pad with remaining directory entries so the caller always sees at
    // least two options when the directory can provide them
    if selected.len() < 2 {
        for doc in directory {
            if selected.len() >= 2 {
                break;
            }
            if !selected.iter().any(|d| d.id == doc.id) {
                selected.push(doc.clone());
            }
        }
    }

    selected.truncate(3);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referral::doctor::default_directory;

    #[test]
    fn test_no_referral_outside_consult_and_urgent() {
        let directory = default_directory();
        assert!(recommend(FinalDecision::SelfCare, "chest pain", &directory).is_empty());
        assert!(recommend(FinalDecision::Refused, "chest pain", &directory).is_empty());
    }

    #[test]
    fn test_chest_matches_cardiology() {
        let doctors = recommend(
            FinalDecision::Urgent,
            "Sudden CHEST tightness",
            &default_directory(),
        );
        assert!(doctors.iter().any(|d| d.specialty == "Cardiology"));
    }

    #[test]
    fn test_consult_always_includes_general_practice() {
        let doctors = recommend(
            FinalDecision::Consult,
            "chest pain when climbing stairs",
            &default_directory(),
        );
        assert!(doctors.iter().any(|d| d.specialty == "Cardiology"));
        assert!(doctors.iter().any(|d| d.specialty == GENERAL_PRACTICE));
    }

    #[test]
    fn test_unmatched_symptoms_fall_back_to_general_practice() {
        let doctors = recommend(FinalDecision::Urgent, "sore elbow", &default_directory());
        assert!(doctors.iter().any(|d| d.specialty == GENERAL_PRACTICE));
    }

    #[test]
    fn test_length_bounds() {
        let directory = default_directory();
        for symptoms in [
            "chest pain and headache and cough and thirst",
            "sore elbow",
            "dizzy",
        ] {
            let doctors = recommend(FinalDecision::Urgent, symptoms, &directory);
            assert!(doctors.len() <= 3);
            assert!(doctors.len() >= directory.len().min(2));
        }
    }

    #[test]
    fn test_padding_never_duplicates() {
        let doctors = recommend(FinalDecision::Urgent, "dizzy", &default_directory());
        let mut ids: Vec<u32> = doctors.iter().map(|d| d.id).collect();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_directory_order_preserved() {
        let doctors = recommend(
            FinalDecision::Urgent,
            "chest pain, short of breath, constant thirst",
            &default_directory(),
        );
        let ids: Vec<u32> = doctors.iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_deterministic() {
        let directory = default_directory();
        let first = recommend(FinalDecision::Consult, "headache and fever", &directory);
        for _ in 0..5 {
            assert_eq!(
                recommend(FinalDecision::Consult, "headache and fever", &directory),
                first
            );
        }
    }

    #[test]
    fn test_small_directory_exhausted_gracefully() {
        let directory = vec![Doctor::new(
            1,
            "Dr. Only One",
            "Cardiology",
            "Clinic",
            "000",
            "one@clinic.org",
            "Available",
        )];
        let doctors = recommend(FinalDecision::Urgent, "sore elbow", &directory);
        assert_eq!(doctors.len(), 1);
    }
}
