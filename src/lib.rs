//! # Open-channel
//!
//! `open-channel` computes the quantities needed to size and analyse steady flow in a prismatic
//! rectangular or trapezoidal open channel: cross-section geometry, normal depth from Manning's
//! equation, critical depth, slope and profile classification, and the distance between two known
//! depths using the direct step method.  Everything is in US customary units (ft, cfs, ft/s²).
//!
//! ## Example
//!
//! ```
//! use open_channel::{Channel, ChannelConfig};
//!
//! let ch = Channel::new(
//!     ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0)
//! ).expect("valid channel");
//!
//! let yn = ch.norm_depth().expect("normal depth");
//! assert!((yn - 2.04).abs() < 0.01);
//! ```
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

pub mod classify;
pub mod config;
pub mod error;
pub mod geometry;
pub mod profile;
pub mod solver;

pub use classify::{Point, ProfileType, SlopeClass, Trend};
pub use config::ChannelConfig;
pub use error::{ChannelError, ErrorKind};
pub use geometry::Section;
pub use profile::{Profile, ProfileRenderer, TableRenderer};
pub use solver::SolverOptions;

/// Manning constant for US customary units.
pub const K_MANNING: f64 = 1.486;

/// Gravitational acceleration, ft/s².
pub const GRAVITY: f64 = 32.2;

/// A prismatic channel carrying a steady design flow.
///
/// Built from a validated [`ChannelConfig`] and never modified afterwards.  Normal and critical
/// depth are solved the first time they are asked for and remembered, so a `Channel` can be shared
/// between threads and queried repeatedly.
#[derive(Debug, Clone)]
pub struct Channel {
    config: ChannelConfig,
    section: Section,
    yn: OnceLock<f64>,
    yc: OnceLock<f64>,
}

fn check_depth(y: f64) -> Result<f64, ChannelError> {
    if !y.is_finite() || y <= 0.0 {
        return Err(ChannelError::Domain { depth: y });
    }
    Ok(y)
}

impl Channel {
    /// Validates `config` and builds the channel.
    ///
    /// # Example
    ///
    /// ```
    /// use open_channel::{Channel, ChannelConfig, ErrorKind};
    ///
    /// let err = Channel::new(
    ///     ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0).with_depths(2.0, 2.0)
    /// ).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new(config: ChannelConfig) -> Result<Self, ChannelError> {
        config.validate()?;
        let section = Section::new(config.b, config.zleft, config.zright);
        Ok(Self {
            config,
            section,
            yn: OnceLock::new(),
            yc: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Top width of the water surface at depth `y`.
    pub fn top(&self, y: f64) -> f64 {
        self.section.top(y)
    }

    /// Flow area at depth `y`.
    pub fn area(&self, y: f64) -> f64 {
        self.section.area(y)
    }

    /// Wetted perimeter at depth `y`.
    pub fn wet_perim(&self, y: f64) -> f64 {
        self.section.wet_perim(y)
    }

    /// Hydraulic radius at depth `y`, a [`ChannelError::Domain`] unless `y > 0`.
    pub fn hyd_rad(&self, y: f64) -> Result<f64, ChannelError> {
        self.section.hyd_rad(y)
    }

    /// Mean velocity of the design flow at depth `y`.
    pub fn velocity(&self, y: f64) -> Result<f64, ChannelError> {
        let y = check_depth(y)?;
        Ok(self.config.q / self.area(y))
    }

    /// Froude number of the design flow at depth `y`.
    pub fn froude(&self, y: f64) -> Result<f64, ChannelError> {
        let y = check_depth(y)?;
        let a = self.area(y);
        Ok((self.config.q.powi(2) * self.top(y) / (GRAVITY * a.powi(3))).sqrt())
    }

    /// Depth plus velocity head, `y + alpha·q²/(2·g·A²)`.
    pub fn specific_energy(&self, y: f64) -> Result<f64, ChannelError> {
        let v = self.velocity(y)?;
        Ok(y + self.config.alpha * v * v / (2.0 * GRAVITY))
    }

    /// Slope that would carry the design flow uniformly at depth `y`, Manning solved for slope.
    pub fn friction_slope(&self, y: f64) -> Result<f64, ChannelError> {
        let r = self.hyd_rad(y)?;
        let conveyance = K_MANNING * self.area(y) * r.powf(2.0 / 3.0);
        Ok((self.config.q * self.config.n / conveyance).powi(2))
    }

    /// Flow carried at uniform depth `y` by this channel's slope and roughness.
    fn manning_flow(&self, y: f64) -> f64 {
        let c = &self.config;
        self.section.hyd_rad(y).map_or(f64::NAN, |r| {
            (K_MANNING / c.n) * self.area(y) * r.powf(2.0 / 3.0) * c.slope.sqrt()
        })
    }

    /// Normal depth: the depth at which Manning's equation carries the design flow.
    ///
    /// Solves `(k/n)·A·R^(2/3)·√S − q = 0` by bracketing and bisection.  The residual increases
    /// strictly with depth so the positive root is unique.
    ///
    /// # Errors
    ///
    /// [`ChannelError::NoBracket`] or [`ChannelError::NotConverged`] when the solver limits in
    /// [`SolverOptions`] are exhausted.
    pub fn norm_depth(&self) -> Result<f64, ChannelError> {
        if let Some(&yn) = self.yn.get() {
            return Ok(yn);
        }
        let q = self.config.q;
        let yn = solver::find_root(|y: f64| self.manning_flow(y) - q, &self.config.solver)?;
        debug!(yn, "normal depth");
        Ok(*self.yn.get_or_init(|| yn))
    }

    /// Critical depth: the depth at which the Froude number is one and specific energy is least.
    ///
    /// Solves `q²·T/(g·A³) − 1 = 0`, which decreases strictly with depth.
    pub fn crit_depth(&self) -> Result<f64, ChannelError> {
        if let Some(&yc) = self.yc.get() {
            return Ok(yc);
        }
        let q2 = self.config.q.powi(2);
        let yc = solver::find_root(
            |y: f64| q2 * self.top(y) / (GRAVITY * self.area(y).powi(3)) - 1.0,
            &self.config.solver,
        )?;
        debug!(yc, "critical depth");
        Ok(*self.yc.get_or_init(|| yc))
    }

    /// Bed slope at which normal depth equals critical depth for the design flow.
    pub fn critical_slope(&self) -> Result<f64, ChannelError> {
        self.friction_slope(self.crit_depth()?)
    }

    /// Relative band within which two depths are treated as equal when classifying.
    fn band(&self) -> f64 {
        10.0 * self.config.solver.rtol
    }

    /// Whether the channel slope is mild, critical or steep for the design flow.
    pub fn slope_class(&self) -> Result<SlopeClass, ChannelError> {
        Ok(classify::slope_class(self.norm_depth()?, self.crit_depth()?, self.band()))
    }

    /// Gradually varied flow profile a depth `y` lies on.
    pub fn profile_type(&self, y: f64) -> Result<ProfileType, ChannelError> {
        let y = check_depth(y)?;
        classify::profile_type(y, self.norm_depth()?, self.crit_depth()?, self.band())
    }

    fn depths(&self) -> Result<(f64, f64), ChannelError> {
        match (self.config.y1, self.config.y2) {
            (Some(y1), Some(y2)) => Ok((y1, y2)),
            _ => Err(ChannelError::MissingDepths),
        }
    }

    /// Which of the two known depths is further downstream.
    ///
    /// # Errors
    ///
    /// [`ChannelError::MissingDepths`] unless both `y1` and `y2` were configured, and
    /// [`ChannelError::AmbiguousProfile`] when the depths sit at, or on opposite sides of, normal
    /// or critical depth.
    pub fn downstream(&self) -> Result<Point, ChannelError> {
        let (y1, y2) = self.depths()?;
        classify::downstream(y1, y2, self.norm_depth()?, self.crit_depth()?, self.band())
    }

    /// Water surface profile from the upstream known depth to the downstream one.
    pub fn profile(&self) -> Result<Profile, ChannelError> {
        let (y1, y2) = self.depths()?;
        let (upstream, y_up, y_down) = match self.downstream()? {
            Point::One => (Point::Two, y2, y1),
            Point::Two => (Point::One, y1, y2),
        };
        profile::march(self, upstream, y_up, y_down, self.config.steps)
    }

    /// Distance in feet between the stations at depths `y1` and `y2`, by the direct step method.
    ///
    /// The result is positive and does not depend on the order the two depths were given in.
    ///
    /// # Example
    ///
    /// ```
    /// use open_channel::{Channel, ChannelConfig};
    ///
    /// let ch = Channel::new(
    ///     ChannelConfig::new(160.0, 2.0, 2.0, 0.014, 0.0034, 83700.0)
    ///         .with_depths(15.0, 17.0)
    ///         .with_alpha(1.05)
    /// ).expect("valid channel");
    ///
    /// let dist = ch.direct_step().expect("distance");
    /// assert!((dist - 1340.0).abs() < 20.0);
    /// ```
    pub fn direct_step(&self) -> Result<f64, ChannelError> {
        Ok(self.profile()?.length())
    }

    /// Like [`direct_step`](Self::direct_step), also handing the profile to `renderer`.
    pub fn direct_step_rendered<R>(&self, renderer: &mut R) -> Result<f64, ChannelError>
    where
        R: ProfileRenderer + ?Sized,
    {
        let profile = self.profile()?;
        renderer.render(&profile)?;
        Ok(profile.length())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        if self.section.is_rectangular() {
            write!(f, "rectangular channel, b = {} ft", c.b)?;
        } else {
            write!(f, "trapezoidal channel, b = {} ft, z = {}:1 / {}:1", c.b, c.zleft, c.zright)?;
        }
        write!(f, ", n = {}, S = {}, Q = {} cfs", c.n, c.slope, c.q)?;
        if let (Some(y1), Some(y2)) = (c.y1, c.y2) {
            write!(f, ", y1 = {y1} ft, y2 = {y2} ft")?;
        }
        Ok(())
    }
}
