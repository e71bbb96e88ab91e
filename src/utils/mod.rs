//! Helper functions and macros shared by the layout tools and the figure
//! builders.
//!
//! - Rounding of genomic coordinates to a fixed grid (the axis ranges are
//!   always aligned to whole kilobases).
//! - Arithmetic means over sample chunks.
//! - Macros for common struct operations (getter functions, builder-style
//!   `with_*` methods).

use itertools::Itertools;

/// Rounds `value` down to the nearest multiple of `step`.
pub fn floor_to(
    value: f64,
    step: f64,
) -> f64 {
    (value / step).floor() * step
}

/// Rounds `value` up to the nearest multiple of `step`.
pub fn ceil_to(
    value: f64,
    step: f64,
) -> f64 {
    (value / step).ceil() * step
}

/// Arithmetic mean of an iterator of values. Returns [None] for an empty
/// iterator.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>, {
    let (sum, count) = values
        .into_iter()
        .fold((0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    }
    else {
        Some(sum / count as f64)
    }
}

/// Minimum and maximum of the finite values, ignoring NaN and infinities.
pub fn finite_minmax<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>, {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .minmax_by(|a, b| a.total_cmp(b))
        .into_option()
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1_234.0, 1_000.0)]
    #[case(999.0, 0.0)]
    #[case(-1.0, -1_000.0)]
    #[case(5_000.0, 5_000.0)]
    fn test_floor_to_kb(
        #[case] value: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(floor_to(value, 1000.0), expected);
    }

    #[rstest]
    #[case(1_234.0, 2_000.0)]
    #[case(1.0, 1_000.0)]
    #[case(-1_500.0, -1_000.0)]
    #[case(5_000.0, 5_000.0)]
    fn test_ceil_to_kb(
        #[case] value: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(ceil_to(value, 1000.0), expected);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_approx_eq!(mean(vec![1.0, 2.0, 6.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_finite_minmax_skips_nan() {
        let res = finite_minmax(vec![3.0, f64::NAN, -1.0, f64::INFINITY]);
        assert_eq!(res, Some((-1.0, 3.0)));
        assert_eq!(finite_minmax(vec![f64::NAN]), None);
    }
}
