//! Region & padding calculator.
//!
//! Produces the x-axis range of a region plot from the observed feature and
//! signal coordinates: the observed span is padded by a fraction of itself,
//! snapped outwards to whole kilobases and, when a focal interval and a
//! radius are given, intersected with the radius window around the focus.

use itertools::Itertools;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
    Serializer,
};

use crate::data_structs::typedef::PosType;
use crate::data_structs::Interval;
use crate::error::invalid_input;
use crate::utils::{
    ceil_to,
    finite_minmax,
    floor_to,
};
use crate::{
    with_field_fn,
    Result,
};

/// Numeric axis range. Serialized as a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(
        min: f64,
        max: f64,
    ) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 { self.max - self.min }

    pub fn contains(
        &self,
        value: f64,
    ) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whether `other` lies completely inside this range.
    pub fn covers(
        &self,
        other: &AxisRange,
    ) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

impl Serialize for AxisRange {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer, {
        [self.min, self.max].serialize(serializer)
    }
}

impl From<Interval> for AxisRange {
    fn from(value: Interval) -> Self {
        Self::new(value.start as f64, value.end as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    /// Share of the observed span added on both sides.
    pub fraction: f64,
    /// Maximal distance from the focal interval, in base pairs.
    pub radius:   Option<PosType>,
    /// Grid the padded bounds are snapped to.
    pub rounding: PosType,
}

impl PaddingConfig {
    with_field_fn!(fraction, f64);
    with_field_fn!(radius, Option<PosType>);
    with_field_fn!(rounding, PosType);

    fn validate(&self) -> Result<()> {
        if !self.fraction.is_finite() || self.fraction < 0.0 {
            return Err(invalid_input!(
                "padding fraction must be a non-negative number, got {}",
                self.fraction
            ));
        }
        if self.rounding <= 0 {
            return Err(invalid_input!(
                "rounding step must be positive, got {}",
                self.rounding
            ));
        }
        if let Some(radius) = self.radius {
            if radius < 0 {
                return Err(invalid_input!(
                    "radius must not be negative, got {}",
                    radius
                ));
            }
        }
        Ok(())
    }
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            fraction: 0.05,
            radius:   None,
            rounding: 1000,
        }
    }
}

/// Computes the visible x range for `positions`.
///
/// `min = floor(observed_min - padding)`, `max = ceil(observed_max + padding)`
/// on the rounding grid, then clamped to `[focus.start - radius, focus.end +
/// radius]` when both a focus and a radius are supplied.
///
/// Fails on an empty position list, when the positions collapse to a
/// zero-width range (a single position lying on the grid) and when the
/// radius window does not intersect the padded range.
pub fn padded_range(
    positions: &[PosType],
    focus: Option<Interval>,
    config: &PaddingConfig,
) -> Result<AxisRange> {
    config.validate()?;
    let (observed_min, observed_max) = positions
        .iter()
        .copied()
        .minmax()
        .into_option()
        .ok_or_else(|| invalid_input!("cannot compute a range of no positions"))?;

    let step = config.rounding as f64;
    let padding = (observed_max - observed_min) as f64 * config.fraction;
    let mut min = floor_to(observed_min as f64 - padding, step);
    let mut max = ceil_to(observed_max as f64 + padding, step);
    if min >= max {
        return Err(invalid_input!(
            "positions collapse to the zero-width range [{}, {}]",
            min,
            max
        ));
    }

    match (focus, config.radius) {
        (Some(focus), Some(radius)) => {
            min = min.max((focus.start - radius) as f64);
            max = max.min((focus.end + radius) as f64);
        },
        (None, Some(radius)) => {
            debug!("Radius {} ignored: no focal interval supplied", radius)
        },
        _ => {},
    }

    if min >= max {
        return Err(invalid_input!(
            "radius window around the focus does not intersect the observed \
             range [{}, {}]",
            observed_min,
            observed_max
        ));
    }
    Ok(AxisRange::new(min, max))
}

/// Rules for a y-axis range: the data range is always extended to include
/// `floor` and `ceil`, then padded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRangeSpec {
    pub floor:     f64,
    pub ceil:      f64,
    pub pad_below: f64,
    pub pad_above: f64,
}

impl ValueRangeSpec {
    /// Unsigned association tracks: `[min(y, 0), max(y, 2) + 1]`.
    pub const ASSOCIATION: ValueRangeSpec = ValueRangeSpec {
        floor:     0.0,
        ceil:      2.0,
        pad_below: 0.0,
        pad_above: 1.0,
    };
    /// Signed association tracks: `[min(y, -2) - 1, max(y, 2) + 1]`.
    pub const SIGNED_ASSOCIATION: ValueRangeSpec = ValueRangeSpec {
        floor:     -2.0,
        ceil:      2.0,
        pad_below: 1.0,
        pad_above: 1.0,
    };
    /// Signal tracks: `[min(y, 0), max(y, 0) + 1]`.
    pub const SIGNAL: ValueRangeSpec = ValueRangeSpec {
        floor:     0.0,
        ceil:      0.0,
        pad_below: 0.0,
        pad_above: 1.0,
    };
}

/// y-axis range of `values`. Non-finite values are ignored; with no finite
/// values the range is `[floor - pad_below, ceil + pad_above]`.
pub fn value_range<I>(
    values: I,
    spec: &ValueRangeSpec,
) -> AxisRange
where
    I: IntoIterator<Item = f64>, {
    let (lo, hi) = finite_minmax(values).unwrap_or((spec.floor, spec.ceil));
    AxisRange::new(
        lo.min(spec.floor) - spec.pad_below,
        hi.max(spec.ceil) + spec.pad_above,
    )
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    use super::*;
    use crate::LayoutError;

    #[test]
    fn test_empty_positions_fail() {
        let res = padded_range(&[], None, &PaddingConfig::default());
        assert!(matches!(res, Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn test_padding_and_rounding() {
        // span 100_000, padding 5_000
        let range =
            padded_range(&[101_500, 201_500], None, &PaddingConfig::default())
                .unwrap();
        assert_eq!(range, AxisRange::new(96_000.0, 207_000.0));
    }

    #[rstest]
    #[case(&[5_000])]
    #[case(&[5_000, 5_000, 5_000])]
    #[case(&[0])]
    fn test_zero_width_range_fails(#[case] positions: &[PosType]) {
        let res = padded_range(positions, None, &PaddingConfig::default());
        assert!(matches!(res, Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn test_single_position_off_grid() {
        let range =
            padded_range(&[5_400], None, &PaddingConfig::default()).unwrap();
        assert_eq!(range, AxisRange::new(5_000.0, 6_000.0));
    }

    #[test]
    fn test_radius_clamps_to_focus_window() {
        let config = PaddingConfig::default().with_radius(Some(10_000));
        let focus = Interval::new(50_000, 52_000);
        let range =
            padded_range(&[0, 20_000, 51_000, 200_000], Some(focus), &config)
                .unwrap();
        assert_eq!(range, AxisRange::new(40_000.0, 62_000.0));
    }

    #[test]
    fn test_radius_without_focus_is_ignored() {
        let config = PaddingConfig::default().with_radius(Some(10));
        let range = padded_range(&[0, 100_000], None, &config).unwrap();
        assert_eq!(range, AxisRange::new(-5_000.0, 105_000.0));
    }

    #[test]
    fn test_disjoint_focus_window_fails() {
        let config = PaddingConfig::default().with_radius(Some(1_000));
        let focus = Interval::point(10_000_000);
        let res = padded_range(&[0, 10_000], Some(focus), &config);
        assert!(matches!(res, Err(LayoutError::InvalidInput(_))));
    }

    #[rstest]
    #[case(PaddingConfig::default().with_fraction(-0.1))]
    #[case(PaddingConfig::default().with_fraction(f64::NAN))]
    #[case(PaddingConfig::default().with_rounding(0))]
    #[case(PaddingConfig::default().with_radius(Some(-5)))]
    fn test_invalid_config(#[case] config: PaddingConfig) {
        assert!(padded_range(&[1, 2], None, &config).is_err());
    }

    #[test]
    fn test_value_range_specs() {
        let r = value_range(vec![0.5, 7.2], &ValueRangeSpec::ASSOCIATION);
        assert_approx_eq!(r.min, 0.0);
        assert_approx_eq!(r.max, 8.2);

        let r = value_range(vec![-5.0, 1.0], &ValueRangeSpec::SIGNED_ASSOCIATION);
        assert_approx_eq!(r.min, -6.0);
        assert_approx_eq!(r.max, 3.0);

        let r = value_range(Vec::<f64>::new(), &ValueRangeSpec::SIGNAL);
        assert_approx_eq!(r.min, 0.0);
        assert_approx_eq!(r.max, 1.0);
    }

    #[test]
    fn test_axis_range_serializes_as_pair() {
        let json = serde_json::to_string(&AxisRange::new(1.0, 2.5)).unwrap();
        assert_eq!(json, "[1.0,2.5]");
    }
}
