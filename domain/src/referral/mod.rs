//! Specialist referral matching against a static doctor directory

pub mod doctor;
pub mod matcher;

pub use doctor::{Doctor, default_directory};
pub use matcher::{GENERAL_PRACTICE, recommend};
