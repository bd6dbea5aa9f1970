//! Cross-section geometry of a prismatic trapezoidal channel.
//!
//! A rectangular channel is the special case `zleft = zright = 0`. Side slopes are the horizontal
//! run for a vertical rise of 1.

use crate::error::ChannelError;

/// Shape of a trapezoidal cross section, all lengths in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub b: f64,
    pub zleft: f64,
    pub zright: f64,
}

impl Section {
    pub fn new(b: f64, zleft: f64, zright: f64) -> Self {
        Self { b, zleft, zright }
    }

    /// True when both side walls are vertical.
    pub fn is_rectangular(&self) -> bool {
        self.zleft == 0.0 && self.zright == 0.0
    }

    /// Width of the water surface at depth `y`.
    pub fn top(&self, y: f64) -> f64 {
        self.b + y * (self.zleft + self.zright)
    }

    /// Flow area at depth `y`.
    pub fn area(&self, y: f64) -> f64 {
        self.b * y + y * y * (self.zleft + self.zright) / 2.0
    }

    /// Wetted perimeter at depth `y`: the bottom plus both sloping walls.
    pub fn wet_perim(&self, y: f64) -> f64 {
        let walls = (1.0 + self.zleft * self.zleft).sqrt() + (1.0 + self.zright * self.zright).sqrt();
        self.b + y * walls
    }

    /// Hydraulic radius `area / wet_perim`.
    ///
    /// Undefined for a dry section, so any depth that is not finite and strictly positive is a
    /// [`ChannelError::Domain`].
    pub fn hyd_rad(&self, y: f64) -> Result<f64, ChannelError> {
        if !y.is_finite() || y <= 0.0 {
            return Err(ChannelError::Domain { depth: y });
        }
        let p = self.wet_perim(y);
        if p <= 0.0 {
            return Err(ChannelError::Domain { depth: y });
        }
        Ok(self.area(y) / p)
    }
}
