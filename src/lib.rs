//! A Rust library for generating synthetic cardiovascular-risk patient records with
//! correlated attributes, a deterministic risk score and an ordinal plaque stage.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{GeneratorConfig, RuleSet, SamplingConfig, StreamMode};
pub use error::{Result, SynthError};
pub use models::{
    ActivityLevel, HealthLabel, PatientProfile, PatientRecord, PlaqueStage, RiskAssessment, Sex,
    SmokingStatus,
};

// Pipeline
pub use algorithm::{
    AttributeSampler, DatasetGenerator, DatasetSummary, assess, enforce_consistency,
    generate_dataset, score, stage,
};

// Export
pub use export::{write_csv, write_dataset, write_parquet};
