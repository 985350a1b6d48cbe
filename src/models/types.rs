//! Common domain type definitions
//!
//! Closed categorical types shared by the sampler, the rule tables and the exporter.

use std::fmt;

/// Sex of a synthetic patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

impl Sex {
    /// Single-letter code used in exported datasets
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tobacco smoking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmokingStatus {
    /// Never smoked
    Never,
    /// Quit smoking
    Former,
    /// Currently smoking
    Current,
}

impl SmokingStatus {
    /// All statuses in sampling order
    pub const ALL: [Self; 3] = [Self::Never, Self::Former, Self::Current];

    /// Lowercase name used in exported datasets
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Former => "former",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Habitual physical activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    /// Mostly sedentary
    Low,
    /// Some regular activity
    Moderate,
    /// Regular vigorous activity
    High,
}

impl ActivityLevel {
    /// All levels in sampling order
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    /// Lowercase name used in exported datasets
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BMI band a sampled body-mass target is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiBand {
    /// Normal weight
    Low,
    /// Overweight
    Moderate,
    /// Obese
    High,
    /// Severely obese
    VeryHigh,
}

impl BmiBand {
    /// All bands in sampling order
    pub const ALL: [Self; 4] = [Self::Low, Self::Moderate, Self::High, Self::VeryHigh];
}

/// Ordinal atherosclerotic plaque stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaqueStage {
    /// No detectable disease
    Stage0 = 0,
    /// Early risk
    Stage1 = 1,
    /// Elevated risk
    Stage2 = 2,
    /// Established disease
    Stage3 = 3,
    /// Severe or multi-site disease
    Stage4 = 4,
}

impl PlaqueStage {
    /// All stages in severity order
    pub const ALL: [Self; 5] = [
        Self::Stage0,
        Self::Stage1,
        Self::Stage2,
        Self::Stage3,
        Self::Stage4,
    ];

    /// Get the numeric value for this stage
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert a numeric stage (0-4) to `PlaqueStage`
    #[must_use]
    pub const fn from_u8(stage: u8) -> Option<Self> {
        match stage {
            0 => Some(Self::Stage0),
            1 => Some(Self::Stage1),
            2 => Some(Self::Stage2),
            3 => Some(Self::Stage3),
            4 => Some(Self::Stage4),
            _ => None,
        }
    }
}

impl fmt::Display for PlaqueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Binary health label derived from the plaque stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthLabel {
    /// Stage 0
    Healthy,
    /// Any stage above 0
    Risk,
}

impl HealthLabel {
    /// Label text used in exported datasets
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Risk => "Risk",
        }
    }
}

impl From<PlaqueStage> for HealthLabel {
    fn from(stage: PlaqueStage) -> Self {
        match stage {
            PlaqueStage::Stage0 => Self::Healthy,
            _ => Self::Risk,
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
