//! Positional down-sampling of dense signal tracks.
//!
//! Consecutive runs of `bin_size` samples (in position order) are averaged
//! into one point. This is only used on the rendering path without WebGL;
//! with WebGL the samples are passed through untouched.

use itertools::Itertools;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::SignalSample;
use crate::error::invalid_input;
use crate::utils::mean;
use crate::Result;

/// Number of raw samples that map to roughly one drawn point.
pub const TARGET_POINTS: usize = 1000;

/// `max(1, floor(n / 1000))`.
pub fn bin_size_for(n: usize) -> usize { (n / TARGET_POINTS).max(1) }

/// One averaged point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinnedPoint {
    pub position: f64,
    pub value:    f64,
}

/// Averages consecutive chunks of `bin_size` samples.
///
/// Binning follows index order, so callers should sort by position first
/// (see [`sort_by_position`]). The last chunk may be shorter. The output has
/// `ceil(n / bin_size)` points.
pub fn downsample(
    samples: &[SignalSample],
    bin_size: usize,
) -> Result<Vec<BinnedPoint>> {
    if bin_size == 0 {
        return Err(invalid_input!("bin size must be at least 1"));
    }

    samples
        .chunks(bin_size)
        .map(|chunk| {
            let position = mean(chunk.iter().map(|s| s.position as f64));
            let value = mean(chunk.iter().map(|s| s.value));
            match (position, value) {
                (Some(position), Some(value)) => Ok(BinnedPoint { position, value }),
                _ => Err(invalid_input!("empty bin")),
            }
        })
        .collect()
}

/// Stable sort by position.
pub fn sort_by_position(samples: &mut [SignalSample]) {
    samples.sort_by_key(|s| s.position);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalRendering {
    /// Averaged markers, drawn with the SVG renderer.
    #[default]
    Binned,
    /// Every sample, drawn with the WebGL renderer.
    FullResolution,
}

impl SignalRendering {
    pub fn from_webgl(use_webgl: bool) -> Self {
        if use_webgl {
            Self::FullResolution
        }
        else {
            Self::Binned
        }
    }
}

/// Coordinates of one signal track ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSignal {
    pub x:         Vec<f64>,
    pub y:         Vec<f64>,
    /// 1 on the full-resolution path.
    pub bin_size:  usize,
    pub rendering: SignalRendering,
    /// Sample count before binning.
    pub raw_len:   usize,
}

impl PreparedSignal {
    pub fn is_binned(&self) -> bool { self.bin_size > 1 }

    pub fn len(&self) -> usize { self.x.len() }

    pub fn is_empty(&self) -> bool { self.x.is_empty() }
}

/// Sorts a copy of `samples` and turns it into drawable coordinates.
///
/// An empty track gives empty coordinates.
pub fn prepare_signal(
    samples: &[SignalSample],
    rendering: SignalRendering,
) -> Result<PreparedSignal> {
    let mut sorted = samples.to_vec();
    sort_by_position(&mut sorted);
    let raw_len = sorted.len();

    let prepared = match rendering {
        SignalRendering::FullResolution => {
            let (x, y) = sorted
                .iter()
                .map(|s| (s.position as f64, s.value))
                .unzip();
            PreparedSignal {
                x,
                y,
                bin_size: 1,
                rendering,
                raw_len,
            }
        },
        SignalRendering::Binned => {
            let bin_size = bin_size_for(raw_len);
            let (x, y) = downsample(&sorted, bin_size)?
                .into_iter()
                .map(|p| (p.position, p.value))
                .unzip();
            PreparedSignal {
                x,
                y,
                bin_size,
                rendering,
                raw_len,
            }
        },
    };

    debug!(
        "Prepared {} of {} samples ({:?}, bin size {})",
        prepared.len(),
        raw_len,
        rendering,
        prepared.bin_size
    );
    Ok(prepared)
}

/// Whether every bin holds samples that are contiguous in the sorted input.
/// Used by diagnostics to check that positions were sorted before binning.
pub fn is_monotonic(points: &[BinnedPoint]) -> bool {
    points
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.position <= b.position)
}
