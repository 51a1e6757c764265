//! Reduction configuration.
//!
//! Everything that used to be a process-wide tunable lives here and is passed
//! explicitly into the grade and geometry computations.

use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};

/// Horizontal and vertical ratios applied when computing core bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrinkRatios {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for ShrinkRatios {
    fn default() -> Self {
        Self {
            horizontal: 0.5,
            vertical: 0.5,
        }
    }
}

/// Default weight of each support kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportWeights {
    /// Stem attached to a head.
    pub head_stem: f64,
    /// Accidental governing the head it precedes.
    pub alter_head: f64,
    /// Augmentation dot following a head.
    pub dot_head: f64,
    /// Any other support, when no explicit weight is given.
    pub generic: f64,
}

impl Default for SupportWeights {
    fn default() -> Self {
        Self {
            head_stem: 2.0,
            alter_head: 1.0,
            dot_head: 0.5,
            generic: 0.5,
        }
    }
}

/// What happens to ensemble members when their ensemble is removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsemblePolicy {
    /// Members are removed together with the ensemble.
    #[default]
    Cascade,
    /// Members survive without an ensemble.
    Orphan,
}

/// Configuration of a SIG and its reduction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigConfig {
    pub shrink: ShrinkRatios,
    pub weights: SupportWeights,
    pub ensemble_policy: EnsemblePolicy,
    /// Side of a spatial index bucket, in pixels.
    pub grid_cell_size: f64,
    /// Upper bound on reduction rounds before the pass is aborted.
    pub max_reduction_rounds: usize,
}

impl Default for SigConfig {
    fn default() -> Self {
        Self {
            shrink: ShrinkRatios::default(),
            weights: SupportWeights::default(),
            ensemble_policy: EnsemblePolicy::default(),
            grid_cell_size: 64.0,
            max_reduction_rounds: 100_000,
        }
    }
}

impl SigConfig {
    pub fn validate(&self) -> TypesResult<()> {
        for (name, ratio) in [
            ("shrink.horizontal", self.shrink.horizontal),
            ("shrink.vertical", self.shrink.vertical),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(TypesError::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, ratio
                )));
            }
        }

        for (name, weight) in [
            ("weights.head_stem", self.weights.head_stem),
            ("weights.alter_head", self.weights.alter_head),
            ("weights.dot_head", self.weights.dot_head),
            ("weights.generic", self.weights.generic),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TypesError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if !(self.grid_cell_size.is_finite() && self.grid_cell_size > 0.0) {
            return Err(TypesError::InvalidConfig(format!(
                "grid_cell_size must be positive, got {}",
                self.grid_cell_size
            )));
        }

        if self.max_reduction_rounds == 0 {
            return Err(TypesError::InvalidConfig(
                "max_reduction_rounds must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
