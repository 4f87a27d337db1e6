//! Interactive case intake

pub mod session;

pub use session::IntakeSession;
