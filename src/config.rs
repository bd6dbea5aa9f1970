//! Construction configuration for a [`Channel`](crate::Channel).

use serde::Deserialize;

use crate::error::ChannelError;
use crate::solver::SolverOptions;

/// Parameters describing a channel and, optionally, two known depths along it.
///
/// All values are US customary: feet, cubic feet per second.
///
/// # Example
///
/// ```
/// use open_channel::ChannelConfig;
///
/// let config = ChannelConfig::new(160.0, 2.0, 2.0, 0.014, 0.0034, 83700.0)
///     .with_depths(15.0, 17.0)
///     .with_alpha(1.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Bottom width.
    pub b: f64,
    /// Left side slope, horizontal run per unit rise.
    pub zleft: f64,
    /// Right side slope, horizontal run per unit rise.
    pub zright: f64,
    /// Manning roughness coefficient.
    pub n: f64,
    /// Longitudinal bed slope as a decimal (6% is 0.06).
    pub slope: f64,
    /// Design flowrate.
    pub q: f64,
    /// Depth at the first known station.
    #[serde(default)]
    pub y1: Option<f64>,
    /// Depth at the second known station.
    #[serde(default)]
    pub y2: Option<f64>,
    /// Velocity head correction factor.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Number of equal depth increments used by the direct step method.
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub solver: SolverOptions,
}

fn default_alpha() -> f64 {
    1.0
}
fn default_steps() -> usize {
    50
}

impl ChannelConfig {
    /// Creates a configuration without known depths, `alpha = 1` and 50 direct-step increments.
    pub fn new(b: f64, zleft: f64, zright: f64, n: f64, slope: f64, q: f64) -> Self {
        Self {
            b,
            zleft,
            zright,
            n,
            slope,
            q,
            y1: None,
            y2: None,
            alpha: default_alpha(),
            steps: default_steps(),
            solver: SolverOptions::default(),
        }
    }

    /// Sets both known depths.
    pub fn with_depths(mut self, y1: f64, y2: f64) -> Self {
        self.y1 = Some(y1);
        self.y2 = Some(y2);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    /// Validates this configuration.
    ///
    /// Width, roughness, slope, flow, alpha and any given depth must be finite and positive, side
    /// slopes finite and non-negative, and `y1 != y2` when both are given.
    pub fn validate(&self) -> Result<(), ChannelError> {
        positive("b", self.b)?;
        non_negative("zleft", self.zleft)?;
        non_negative("zright", self.zright)?;
        positive("n", self.n)?;
        positive("slope", self.slope)?;
        positive("q", self.q)?;
        positive("alpha", self.alpha)?;
        if let Some(y1) = self.y1 {
            positive("y1", y1)?;
        }
        if let Some(y2) = self.y2 {
            positive("y2", y2)?;
        }
        if let (Some(y1), Some(y2)) = (self.y1, self.y2) {
            if y1 == y2 {
                return Err(ChannelError::EqualDepths { depth: y1 });
            }
        }
        if self.steps == 0 {
            return Err(ChannelError::InvalidSteps);
        }
        self.solver.validate()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ChannelError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChannelError::InvalidParameter {
            name,
            value,
            expected: "finite and > 0",
        });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ChannelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChannelError::InvalidParameter {
            name,
            value,
            expected: "finite and >= 0",
        });
    }
    Ok(())
}
