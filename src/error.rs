//! Error types for channel construction, depth solves and profile integration.

use std::io;

/// Broad category of a [`ChannelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid construction, or an operation needing depths that were not given.
    Configuration,
    /// A bounded solve, or a direct-step increment, did not produce a result.
    Convergence,
    /// The downstream point cannot be decided from the two depths.
    AmbiguousProfile,
    /// Geometry queried at a non-physical depth.
    Domain,
    /// The profile renderer failed.
    Render,
}

/// Error type for all fallible operations in this crate.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// A construction parameter is out of range or not finite.
    #[error("invalid {name}: {value} (must be {expected})")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human readable range.
        expected: &'static str,
    },

    /// Both known depths were given and are equal.
    #[error("y1 and y2 are both {depth}, the two depths must differ")]
    EqualDepths {
        /// The repeated depth.
        depth: f64,
    },

    /// The direct-step resolution is zero.
    #[error("direct step needs at least one depth increment")]
    InvalidSteps,

    /// An operation needs y1 and y2 but at least one is absent.
    #[error("operation needs both y1 and y2")]
    MissingDepths,

    /// No sign change was found while expanding the bracket.
    #[error("no sign change found after {expansions} bracket expansions (upper bound {upper})")]
    NoBracket {
        /// Number of doublings attempted.
        expansions: usize,
        /// Last upper bound tried.
        upper: f64,
    },

    /// Bisection hit its iteration cap before meeting the tolerance.
    #[error("bisection did not converge in {iterations} iterations")]
    NotConverged {
        /// The iteration cap that was reached.
        iterations: usize,
    },

    /// Bed slope and mean friction slope are equal over an increment.
    #[error("locally uniform flow between depths {from} and {to}, station distance undefined")]
    UniformFlow {
        /// Depth at the start of the increment.
        from: f64,
        /// Depth at the end of the increment.
        to: f64,
    },

    /// The flow profile cannot resolve which point is downstream.
    #[error("ambiguous profile: {reason}")]
    AmbiguousProfile {
        /// Description of the problem.
        reason: String,
    },

    /// Geometry evaluated at a depth where it is undefined.
    #[error("depth {depth} is outside the physical domain (must be finite and > 0)")]
    Domain {
        /// The rejected depth.
        depth: f64,
    },

    /// The external profile renderer returned an error.
    #[error("failed to render profile")]
    Render(#[from] io::Error),
}

impl ChannelError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. }
            | Self::EqualDepths { .. }
            | Self::InvalidSteps
            | Self::MissingDepths => ErrorKind::Configuration,
            Self::NoBracket { .. } | Self::NotConverged { .. } | Self::UniformFlow { .. } => {
                ErrorKind::Convergence
            }
            Self::AmbiguousProfile { .. } => ErrorKind::AmbiguousProfile,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::Render(_) => ErrorKind::Render,
        }
    }
}
