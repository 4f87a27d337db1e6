//! Core domain primitives

pub mod case;
pub mod error;
