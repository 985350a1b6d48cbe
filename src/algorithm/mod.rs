//! Generation and derivation algorithms
//!
//! Leaf-first: numeric helpers, the correlated attribute sampler, the risk scorer, the
//! stage classifier, the dataset assembler, and summary statistics over its output.

pub mod dataset;
pub mod numeric;
pub mod sampler;
pub mod scoring;
pub mod staging;
pub mod statistics;

pub use dataset::{DatasetGenerator, assess, generate_dataset, substream_rng};
pub use sampler::{AttributeSampler, enforce_consistency};
pub use scoring::{score, score_with};
pub use staging::{stage, stage_with};
pub use statistics::DatasetSummary;
