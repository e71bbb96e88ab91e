//! Colours of glyphs and tracks.

use serde::Serialize;

use crate::utils::finite_minmax;

/// Non-focal genes and SNPs.
pub const GREY: &str = "rgb(161,161,161)";
pub const BLACK: &str = "black";

/// Brightest channel of the effect-size scale.
const MAX_LEVEL: f64 = 230.0;

/// Association values closer to 0 than this are drawn muted.
pub const SIGNIFICANCE_THRESHOLD: f64 = 2.0;

/// Fill colour of the `index`-th of `count` signal tracks, evenly spread over
/// the hue circle.
pub fn track_color(
    index: usize,
    count: usize,
) -> String {
    let hue = index as f64 * 360.0 / count.max(1) as f64;
    format!("hsl({}, 70%, 60%)", hue)
}

/// Absolute effect-size range the colour intensity is normalised to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaScale {
    pub min: f64,
    pub max: f64,
}

impl Default for BetaScale {
    fn default() -> Self { Self { min: 2.0, max: 3.0 } }
}

impl BetaScale {
    /// Range of `|beta|` over `betas`; the default scale when there are no
    /// finite values.
    pub fn from_betas<I>(betas: I) -> Self
    where
        I: IntoIterator<Item = f64>, {
        finite_minmax(betas.into_iter().map(f64::abs))
            .map(|(min, max)| Self { min, max })
            .unwrap_or_default()
    }

    /// Intensity in `[0, 1]`. With a degenerate range `max` acts as a single
    /// threshold.
    pub fn intensity(
        &self,
        beta: f64,
    ) -> f64 {
        let abs = beta.abs();
        if self.min >= self.max {
            if abs >= self.max {
                1.0
            }
            else {
                0.0
            }
        }
        else {
            ((abs - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        }
    }

    /// Colour of a point with effect size `beta` drawn at association value
    /// `y`. Positive effects are red, negative ones blue.
    pub fn color(
        &self,
        beta: f64,
        y: f64,
    ) -> String {
        if y.abs() < SIGNIFICANCE_THRESHOLD {
            return if beta > 0.0 {
                "rgb(200,161,161)".to_string()
            }
            else {
                "rgb(161,161,200)".to_string()
            };
        }
        let channel = (MAX_LEVEL * (1.0 - self.intensity(beta))).round() as u8;
        let max = MAX_LEVEL as u8;
        if beta > 0.0 {
            format!("rgb({},{},{})", max, channel, channel)
        }
        else {
            format!("rgb({},{},{})", channel, channel, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_track_colors() {
        assert_eq!(track_color(0, 3), "hsl(0, 70%, 60%)");
        assert_eq!(track_color(1, 3), "hsl(120, 70%, 60%)");
        assert_eq!(track_color(0, 0), "hsl(0, 70%, 60%)");
    }

    #[rstest]
    #[case(0.5, 1.0, "rgb(200,161,161)")]
    #[case(-0.5, -1.9, "rgb(161,161,200)")]
    #[case(1.0, 5.0, "rgb(230,230,230)")]
    #[case(3.0, 5.0, "rgb(230,0,0)")]
    #[case(-2.0, -5.0, "rgb(115,115,230)")]
    #[case(10.0, 5.0, "rgb(230,0,0)")]
    fn test_effect_colors(
        #[case] beta: f64,
        #[case] y: f64,
        #[case] expected: &str,
    ) {
        let scale = BetaScale { min: 1.0, max: 3.0 };
        assert_eq!(scale.color(beta, y), expected);
    }

    #[test]
    fn test_degenerate_scale_is_threshold() {
        let scale = BetaScale::from_betas(vec![0.4, -0.4]);
        assert_eq!(scale.min, 0.4);
        assert_eq!(scale.intensity(0.4), 1.0);
        assert_eq!(scale.intensity(0.1), 0.0);
    }

    #[test]
    fn test_empty_betas_use_default() {
        assert_eq!(BetaScale::from_betas(Vec::new()), BetaScale::default());
    }
}
