//! Vertical layout of stacked track rows.
//!
//! Each row gets a `[start, end]` extent in normalized plot height. Rows are
//! counted from the bottom: row 0 is the lowest one.

use serde::{
    Deserialize,
    Serialize,
    Serializer,
};

use crate::error::invalid_input;
use crate::{
    getter_fn,
    with_field_fn,
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLayoutConfig {
    /// Pixel height of one track.
    pub track_height:  f64,
    /// Pixel gap between neighbouring tracks.
    pub gap_height:    f64,
    pub margin_top:    f64,
    pub margin_bottom: f64,
    pub margin_left:   f64,
    pub margin_right:  f64,
}

impl TrackLayoutConfig {
    with_field_fn!(track_height, f64);
    with_field_fn!(gap_height, f64);
    with_field_fn!(margin_top, f64);
    with_field_fn!(margin_bottom, f64);
    with_field_fn!(margin_left, f64);
    with_field_fn!(margin_right, f64);

    fn validate(&self) -> Result<()> {
        if !self.track_height.is_finite() || self.track_height <= 0.0 {
            return Err(invalid_input!(
                "track height must be positive, got {}",
                self.track_height
            ));
        }
        if !self.gap_height.is_finite() || self.gap_height < 0.0 {
            return Err(invalid_input!(
                "gap height must not be negative, got {}",
                self.gap_height
            ));
        }
        if [self.margin_top, self.margin_bottom]
            .iter()
            .any(|m| !m.is_finite() || *m < 0.0)
        {
            return Err(invalid_input!("margins must not be negative"));
        }
        Ok(())
    }
}

impl Default for TrackLayoutConfig {
    fn default() -> Self {
        Self {
            track_height:  50.0,
            gap_height:    10.0,
            margin_top:    80.0,
            margin_bottom: 80.0,
            margin_left:   80.0,
            margin_right:  80.0,
        }
    }
}

/// Normalized vertical extent of one row. Serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackDomain {
    pub start: f64,
    pub end:   f64,
}

impl TrackDomain {
    pub fn new(
        start: f64,
        end: f64,
    ) -> Self {
        Self { start, end }
    }

    pub fn height(&self) -> f64 { self.end - self.start }
}

impl Serialize for TrackDomain {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer, {
        [self.start, self.end].serialize(serializer)
    }
}

/// `n` rows starting every `step`, each `height` tall. A row never reaches
/// past the start of the next one, so rounding cannot make rows overlap.
fn stack(
    n: usize,
    height: f64,
    step: f64,
) -> Vec<TrackDomain> {
    let starts: Vec<f64> = (0..n).map(|i| i as f64 * step).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let ceiling = starts.get(i + 1).map_or(1.0, |next| next.min(1.0));
            TrackDomain::new(start, (start + height).min(ceiling))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackDomains {
    domains:      Vec<TrackDomain>,
    /// Total figure height in pixels; [None] for layouts that keep the
    /// container height.
    total_height: Option<f64>,
}

impl TrackDomains {
    getter_fn!(domains, Vec<TrackDomain>);

    /// Domains for `n` rows of fixed pixel height.
    ///
    /// `H = Mtop + Mbottom + n*Ht + (n-1)*Hg`; each row takes `Ht / (H -
    /// Mtop - Mbottom)` and each gap `Hg / (H - Mtop - Mbottom)`. The top of
    /// every row is clamped to 1.
    pub fn compute(
        n: usize,
        config: &TrackLayoutConfig,
    ) -> Result<Self> {
        if n == 0 {
            return Err(invalid_input!("at least one track is required"));
        }
        config.validate()?;

        let content = n as f64 * config.track_height
            + (n - 1) as f64 * config.gap_height;
        let total = config.margin_top + config.margin_bottom + content;
        let dt = config.track_height / content;
        let dg = config.gap_height / content;

        Ok(Self {
            domains:      stack(n, dt, dt + dg),
            total_height: Some(total),
        })
    }

    /// Domains for `n` equally tall rows filling the whole plot, separated by
    /// `spacing` (normalized).
    pub fn uniform(
        n: usize,
        spacing: f64,
    ) -> Result<Self> {
        if n == 0 {
            return Err(invalid_input!("at least one track is required"));
        }
        let gaps = spacing * (n - 1) as f64;
        if !spacing.is_finite() || spacing < 0.0 || gaps >= 1.0 {
            return Err(invalid_input!(
                "spacing {} leaves no room for {} tracks",
                spacing,
                n
            ));
        }

        let height = (1.0 - gaps) / n as f64;
        Ok(Self {
            domains:      stack(n, height, height + spacing),
            total_height: None,
        })
    }

    pub fn total_height(&self) -> Option<f64> { self.total_height }

    pub fn len(&self) -> usize { self.domains.len() }

    pub fn is_empty(&self) -> bool { self.domains.is_empty() }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<TrackDomain> {
        self.domains.get(index).copied()
    }

    /// Domains from the top row down, the order tracks are listed in.
    pub fn top_down(&self) -> impl Iterator<Item = TrackDomain> + '_ {
        self.domains.iter().rev().copied()
    }
}
