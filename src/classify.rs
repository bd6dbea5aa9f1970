//! Slope and water-surface profile classification.
//!
//! A gradually varied profile never crosses normal depth and, without a hydraulic jump, never
//! crosses critical depth. Two known depths therefore have to sit in the same zone, and the zone
//! fixes whether depth rises or falls in the direction of flow.

use std::fmt;

use crate::error::ChannelError;

/// One of the two stations whose depth is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Point {
    One,
    Two,
}

impl Point {
    /// The other point.
    pub fn other(self) -> Self {
        match self {
            Point::One => Point::Two,
            Point::Two => Point::One,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::One => write!(f, "Point 1"),
            Point::Two => write!(f, "Point 2"),
        }
    }
}

/// Channel slope relative to the critical slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeClass {
    /// `yn > yc`
    Mild,
    /// `yn == yc`
    Critical,
    /// `yn < yc`
    Steep,
}

impl fmt::Display for SlopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlopeClass::Mild => "mild",
            SlopeClass::Critical => "critical",
            SlopeClass::Steep => "steep",
        };
        write!(f, "{s}")
    }
}

/// Direction depth changes when following the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Depth increases downstream.
    Rising,
    /// Depth decreases downstream.
    Falling,
}

/// Gradually varied flow profile, slope letter plus zone number.
///
/// Zone 1 lies above both normal and critical depth, zone 2 between them and zone 3 below both.
/// There is no C2 since normal and critical depth coincide on a critical slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    M1,
    M2,
    M3,
    C1,
    C3,
    S1,
    S2,
    S3,
}

impl ProfileType {
    pub fn trend(self) -> Trend {
        match self {
            ProfileType::M2 | ProfileType::S2 => Trend::Falling,
            _ => Trend::Rising,
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

fn within(a: f64, b: f64, band: f64) -> bool {
    (a - b).abs() <= band * a.abs().max(b.abs())
}

/// Classifies the slope from normal depth `yn` and critical depth `yc`.
///
/// The two are taken as equal when they agree to the relative `band`.
pub fn slope_class(yn: f64, yc: f64, band: f64) -> SlopeClass {
    if within(yn, yc, band) {
        SlopeClass::Critical
    } else if yn > yc {
        SlopeClass::Mild
    } else {
        SlopeClass::Steep
    }
}

/// Finds the profile a depth `y` belongs to.
///
/// A depth at normal or critical depth (within `band`) has no unique profile and is reported as
/// [`ChannelError::AmbiguousProfile`].
pub fn profile_type(y: f64, yn: f64, yc: f64, band: f64) -> Result<ProfileType, ChannelError> {
    if within(y, yc, band) {
        return Err(ChannelError::AmbiguousProfile {
            reason: format!("depth {y} is at critical depth {yc}"),
        });
    }
    let class = slope_class(yn, yc, band);
    if class != SlopeClass::Critical && within(y, yn, band) {
        return Err(ChannelError::AmbiguousProfile {
            reason: format!("depth {y} is at normal depth {yn}"),
        });
    }

    let ty = match class {
        SlopeClass::Mild if y > yn => ProfileType::M1,
        SlopeClass::Mild if y > yc => ProfileType::M2,
        SlopeClass::Mild => ProfileType::M3,
        SlopeClass::Critical if y > yc => ProfileType::C1,
        SlopeClass::Critical => ProfileType::C3,
        SlopeClass::Steep if y > yc => ProfileType::S1,
        SlopeClass::Steep if y > yn => ProfileType::S2,
        SlopeClass::Steep => ProfileType::S3,
    };
    Ok(ty)
}

/// Decides which of the two known depths lies downstream.
///
/// Both depths must belong to the same profile. On a rising profile the deeper point is
/// downstream, on a falling one the shallower point is. Swapping `y1` and `y2` swaps the answer,
/// so the same physical station is always picked.
pub fn downstream(y1: f64, y2: f64, yn: f64, yc: f64, band: f64) -> Result<Point, ChannelError> {
    let t1 = profile_type(y1, yn, yc, band)?;
    let t2 = profile_type(y2, yn, yc, band)?;
    if t1 != t2 {
        return Err(ChannelError::AmbiguousProfile {
            reason: format!("depth {y1} is on a {t1} profile but depth {y2} is on {t2}"),
        });
    }

    let deeper = if y1 > y2 { Point::One } else { Point::Two };
    Ok(match t1.trend() {
        Trend::Rising => deeper,
        Trend::Falling => deeper.other(),
    })
}
