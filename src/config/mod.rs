//! Configuration for cohort generation.

pub mod rules;
pub mod sampling;

use std::fmt;

pub use rules::{AgeTerm, RuleSet, ScoringRules, StagingRules, Tier};
pub use sampling::SamplingConfig;

/// How the pseudo-random stream is laid out across records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// One stream consumed record after record
    #[default]
    Sequential,
    /// Record `i` draws from its own substream `i` of the seed, so records can be
    /// generated in any order or in parallel with identical output
    PerRecord,
}

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of records to generate
    pub n: usize,
    /// Seed of the pseudo-random stream
    pub seed: u64,
    /// Stream layout
    pub stream_mode: StreamMode,
    /// Scoring and staging rules
    pub rules: RuleSet,
    /// Attribute sampling parameters
    pub sampling: SamplingConfig,
    /// Show a progress bar while generating
    pub show_progress: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n: 1000,
            seed: 42,
            stream_mode: StreamMode::default(),
            rules: RuleSet::current(),
            sampling: SamplingConfig::default(),
            show_progress: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a generator configuration
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Records: {}", self.n)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(f, "  Stream Mode: {:?}", self.stream_mode)?;
        writeln!(f, "  Rule Set: {}", self.rules.name)?;
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        Ok(())
    }
}

/// Builder for constructing a generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Set the number of records
    #[must_use]
    pub const fn n(mut self, n: usize) -> Self {
        self.config.n = n;
        self
    }

    /// Set the seed
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the stream layout
    #[must_use]
    pub const fn stream_mode(mut self, mode: StreamMode) -> Self {
        self.config.stream_mode = mode;
        self
    }

    /// Set the rule set
    #[must_use]
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.config.rules = rules;
        self
    }

    /// Set the sampling parameters
    #[must_use]
    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.config.sampling = sampling;
        self
    }

    /// Set whether to show a progress bar
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Build the generator configuration
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = GeneratorConfig::builder()
            .n(250)
            .seed(7)
            .stream_mode(StreamMode::PerRecord)
            .rules(RuleSet::legacy())
            .build();

        assert_eq!(config.n, 250);
        assert_eq!(config.seed, 7);
        assert_eq!(config.stream_mode, StreamMode::PerRecord);
        assert_eq!(config.rules.name, "legacy");
        assert!(!config.show_progress);
    }

    #[test]
    fn test_display_lists_rule_set() {
        let rendered = GeneratorConfig::default().to_string();
        assert!(rendered.contains("Rule Set: current"));
        assert!(rendered.contains("Seed: 42"));
    }
}
