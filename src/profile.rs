//! Direct step integration of gradually varied flow.
//!
//! The depth interval between two stations is split into equal increments. For each increment the
//! change in specific energy divided by the difference between bed slope and mean friction slope
//! gives the distance travelled, and the running sum of those distances gives the station of every
//! partition depth.

use std::io::Write;

use ndarray::Array1;
use rayon::prelude::*;
use tracing::debug;

use crate::Channel;
use crate::classify::Point;
use crate::error::ChannelError;

/// Below this fraction of the bed slope, `slope - Sf_avg` is treated as zero.
const UNIFORM_FLOW_RTOL: f64 = 1e-9;

/// Water surface profile between two known depths.
///
/// Stations are in feet measured from the upstream point and increase downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    station: Array1<f64>,
    depth: Array1<f64>,
    slope: f64,
    upstream: Point,
}

impl Profile {
    /// Number of samples, one more than the number of increments.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Distance between the two end stations, always positive.
    pub fn length(&self) -> f64 {
        match self.station.len() {
            0 => 0.0,
            n => self.station[n - 1].abs(),
        }
    }

    pub fn stations(&self) -> &Array1<f64> {
        &self.station
    }

    pub fn depths(&self) -> &Array1<f64> {
        &self.depth
    }

    /// Which of the two known points the profile starts from.
    pub fn upstream(&self) -> Point {
        self.upstream
    }

    /// Bed elevation at every station, with the downstream point as datum.
    pub fn bed_elevation(&self) -> Array1<f64> {
        let length = self.length();
        self.station.mapv(|x| self.slope * (length - x))
    }

    /// Water surface elevation at every station, on the same datum as the bed.
    pub fn water_surface(&self) -> Array1<f64> {
        self.bed_elevation() + &self.depth
    }

    /// `(station, depth)` pairs from upstream to downstream.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.station.iter().copied().zip(self.depth.iter().copied())
    }
}

/// Consumer of a computed profile, e.g. a plotter.
pub trait ProfileRenderer {
    fn render(&mut self, profile: &Profile) -> std::io::Result<()>;
}

/// Writes a profile as a whitespace separated table with a header line.
///
/// Columns are station, depth, bed elevation and water surface elevation, all in feet.
#[derive(Debug)]
pub struct TableRenderer<W: Write> {
    out: W,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProfileRenderer for TableRenderer<W> {
    fn render(&mut self, profile: &Profile) -> std::io::Result<()> {
        let bed = profile.bed_elevation();
        let wse = profile.water_surface();
        writeln!(self.out, "station depth bed water_surface")?;
        for (i, (x, y)) in profile.samples().enumerate() {
            writeln!(self.out, "{:.3} {:.4} {:.4} {:.4}", x, y, bed[i], wse[i])?;
        }
        self.out.flush()
    }
}

/// Marches from `y_up` at the upstream point to `y_down` in `steps` equal depth increments.
#[tracing::instrument(skip(channel))]
pub(crate) fn march(
    channel: &Channel,
    upstream: Point,
    y_up: f64,
    y_down: f64,
    steps: usize,
) -> Result<Profile, ChannelError> {
    if steps == 0 {
        return Err(ChannelError::InvalidSteps);
    }
    let slope = channel.config().slope;
    let depth = Array1::linspace(y_up, y_down, steps + 1);

    // specific energy and friction slope at every partition depth
    let nodes: Vec<(f64, f64)> = depth
        .to_vec()
        .into_par_iter()
        .map(|y| -> Result<(f64, f64), ChannelError> {
            Ok((channel.specific_energy(y)?, channel.friction_slope(y)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut station = Array1::<f64>::zeros(steps + 1);
    for i in 0..steps {
        let (e0, sf0) = nodes[i];
        let (e1, sf1) = nodes[i + 1];
        let denom = slope - 0.5 * (sf0 + sf1);
        if denom.abs() <= UNIFORM_FLOW_RTOL * slope {
            return Err(ChannelError::UniformFlow {
                from: depth[i],
                to: depth[i + 1],
            });
        }
        station[i + 1] = station[i] + (e1 - e0) / denom;
    }
    if station[steps] < 0.0 {
        station.mapv_inplace(|x| -x);
    }

    debug!(distance = station[steps], "direct step complete");
    Ok(Profile {
        station,
        depth,
        slope,
        upstream,
    })
}
