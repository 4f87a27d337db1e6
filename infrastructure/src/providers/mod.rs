//! Opinion provider adapters

pub mod scripted;

#[cfg(feature = "openai")]
pub mod openai;

pub use scripted::ScriptedOpinionGateway;
