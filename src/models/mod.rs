//! Domain models for synthetic cardiovascular cohorts
//!
//! This module contains the patient entity and the closed categorical types it is built from.

pub mod patient;
pub mod types;

// Re-export commonly used types
pub use patient::{PatientProfile, PatientProfileBuilder, PatientRecord, RiskAssessment};
pub use types::{ActivityLevel, BmiBand, HealthLabel, PlaqueStage, Sex, SmokingStatus};
