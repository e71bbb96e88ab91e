//! Collision-avoiding jitter for gene and SNP glyphs.
//!
//! Features of the gene track are drawn as horizontal segments at a random
//! vertical offset so that neighbouring labels and arrows do not sit on top
//! of each other. Features are visited left to right; for each one, random
//! candidates are drawn until one keeps at least `min_y_spacing` away from
//! every already placed feature that is closer than the horizontal spacing
//! threshold. When the retry budget runs out the feature gets an
//! unconstrained random offset and is reported as a fallback.

use hashbrown::HashMap;
use itertools::Itertools;
use log::{
    debug,
    warn,
};
use rand::Rng;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::OffsetType;
use crate::data_structs::Feature;
use crate::error::invalid_input;
use crate::{
    getter_fn,
    with_field_fn,
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    /// Offsets are drawn from `[-max_amplitude, max_amplitude]`.
    pub max_amplitude:          f64,
    /// Horizontal spacing threshold as a share of the visible span.
    pub x_spacing_fraction:     f64,
    /// Minimal vertical distance between horizontally close features.
    pub min_y_spacing:          f64,
    /// Candidate draws per feature before falling back.
    pub max_attempts:           usize,
    /// Candidates are kept at least this far from the focal line at 0.
    pub min_distance_from_zero: f64,
}

impl JitterConfig {
    with_field_fn!(max_amplitude, f64);
    with_field_fn!(x_spacing_fraction, f64);
    with_field_fn!(min_y_spacing, f64);
    with_field_fn!(max_attempts, usize);
    with_field_fn!(min_distance_from_zero, f64);

    /// Settings of the gene- and SNP-centric views, where the focal feature
    /// owns the zero line and the others keep clear of it.
    pub fn around_focus() -> Self {
        Self {
            max_amplitude: 1.75,
            min_distance_from_zero: 0.25,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.max_amplitude.is_finite() || self.max_amplitude <= 0.0 {
            return Err(invalid_input!(
                "jitter amplitude must be positive, got {}",
                self.max_amplitude
            ));
        }
        if !self.x_spacing_fraction.is_finite() || self.x_spacing_fraction < 0.0
        {
            return Err(invalid_input!(
                "horizontal spacing fraction must be non-negative, got {}",
                self.x_spacing_fraction
            ));
        }
        if !self.min_y_spacing.is_finite() || self.min_y_spacing < 0.0 {
            return Err(invalid_input!(
                "vertical spacing must be non-negative, got {}",
                self.min_y_spacing
            ));
        }
        if !(0.0..self.max_amplitude).contains(&self.min_distance_from_zero) {
            return Err(invalid_input!(
                "distance from zero must lie within [0, {}), got {}",
                self.max_amplitude,
                self.min_distance_from_zero
            ));
        }
        Ok(())
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            max_amplitude:          1.55,
            x_spacing_fraction:     0.02,
            min_y_spacing:          0.3,
            max_attempts:           100,
            min_distance_from_zero: 0.0,
        }
    }
}

/// Vertical offsets of every input feature, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JitterAssignment {
    offsets:   HashMap<String, OffsetType>,
    /// Identifiers placed without the spacing guarantee, in visiting order.
    fallbacks: Vec<String>,
}

impl JitterAssignment {
    getter_fn!(fallbacks, Vec<String>);

    pub fn get(
        &self,
        id: &str,
    ) -> Option<OffsetType> {
        self.offsets.get(id).copied()
    }

    /// Offset of `id`, or 0 for identifiers that were not part of the input.
    pub fn offset_or_zero(
        &self,
        id: &str,
    ) -> OffsetType {
        self.get(id).unwrap_or(0.0)
    }

    pub fn fallback_count(&self) -> usize { self.fallbacks.len() }

    pub fn is_fallback(
        &self,
        id: &str,
    ) -> bool {
        self.fallbacks.iter().any(|f| f == id)
    }

    pub fn len(&self) -> usize { self.offsets.len() }

    pub fn is_empty(&self) -> bool { self.offsets.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OffsetType)> + '_ {
        self.offsets.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

struct Placed {
    position: f64,
    offset:   OffsetType,
}

fn draw_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    config: &JitterConfig,
) -> OffsetType {
    let magnitude = config.min_distance_from_zero
        + rng.gen::<f64>()
            * (config.max_amplitude - config.min_distance_from_zero);
    if rng.gen_bool(0.5) {
        magnitude
    }
    else {
        -magnitude
    }
}

fn collides(
    placed: &[Placed],
    position: f64,
    offset: OffsetType,
    min_x_spacing: f64,
    min_y_spacing: f64,
) -> bool {
    placed.iter().any(|p| {
        (p.offset - offset).abs() < min_y_spacing
            && (p.position - position).abs() < min_x_spacing
    })
}

/// Assigns vertical offsets to `features`.
///
/// `visible_span` is the width of the visible x range in base pairs; the
/// horizontal spacing threshold is `visible_span * x_spacing_fraction`. The
/// feature whose identifier equals `focal` is fixed at 0 and placed before
/// all others, so they keep clear of it.
///
/// Every input identifier ends up in the result. Only invalid configuration
/// makes this fail.
pub fn assign_jitter<R: Rng + ?Sized>(
    features: &[Feature],
    visible_span: f64,
    focal: Option<&str>,
    config: &JitterConfig,
    rng: &mut R,
) -> Result<JitterAssignment> {
    config.validate()?;
    if !visible_span.is_finite() || visible_span < 0.0 {
        return Err(invalid_input!(
            "visible span must be a non-negative number, got {}",
            visible_span
        ));
    }
    let min_x_spacing = visible_span * config.x_spacing_fraction;

    let mut assignment = JitterAssignment {
        offsets:   HashMap::with_capacity(features.len()),
        fallbacks: Vec::new(),
    };
    let mut placed: Vec<Placed> = Vec::with_capacity(features.len());

    if let Some(focal_id) = focal {
        match features.iter().find(|f| f.id() == focal_id) {
            Some(feature) => {
                placed.push(Placed {
                    position: feature.position() as f64,
                    offset:   0.0,
                });
                assignment.offsets.insert(feature.id().to_string(), 0.0);
            },
            None => debug!("Focal feature {} is not among the features", focal_id),
        }
    }

    // Stable sort keeps input order for equal positions.
    let ordered = features
        .iter()
        .filter(|f| Some(f.id()) != focal)
        .sorted_by_key(|f| f.position());

    for feature in ordered {
        let position = feature.position() as f64;
        let mut offset = None;

        for _ in 0..config.max_attempts {
            let candidate = draw_candidate(rng, config);
            if !collides(
                &placed,
                position,
                candidate,
                min_x_spacing,
                config.min_y_spacing,
            ) {
                offset = Some(candidate);
                break;
            }
        }

        let offset = match offset {
            Some(offset) => offset,
            None => {
                assignment.fallbacks.push(feature.id().to_string());
                rng.gen_range(-config.max_amplitude..=config.max_amplitude)
            },
        };

        placed.push(Placed { position, offset });
        assignment.offsets.insert(feature.id().to_string(), offset);
    }

    debug!(
        "Assigned {} features with {} fallbacks",
        assignment.len(),
        assignment.fallback_count()
    );
    if assignment.fallback_count() > 0 {
        warn!(
            "Spacing not guaranteed for {} of {} features",
            assignment.fallback_count(),
            assignment.len()
        );
    }
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::data_structs::Strand;

    fn genes(positions: &[i64]) -> Vec<Feature> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Feature::gene(format!("G{}", i), *p, p + 500, Strand::Forward)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_offsets() {
        let features = genes(&[100, 200, 300, 5_000, 9_000]);
        let config = JitterConfig::default();
        let a = assign_jitter(
            &features,
            10_000.0,
            None,
            &config,
            &mut ChaCha8Rng::seed_from_u64(42),
        )
        .unwrap();
        let b = assign_jitter(
            &features,
            10_000.0,
            None,
            &config,
            &mut ChaCha8Rng::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_focal_feature_is_fixed_at_zero() {
        let features = genes(&[100, 150, 200]);
        let config = JitterConfig::around_focus();
        let res = assign_jitter(
            &features,
            10_000.0,
            Some("G1"),
            &config,
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap();
        assert_eq!(res.get("G1"), Some(0.0));
        for id in ["G0", "G2"] {
            let offset = res.get(id).unwrap();
            assert!(offset.abs() >= 0.25 && offset.abs() <= 1.75);
            if !res.is_fallback(id) {
                assert!(offset.abs() >= config.min_y_spacing);
            }
        }
    }

    #[test]
    fn test_zero_budget_falls_back_everywhere() {
        let features = genes(&[100, 200, 300]);
        let config = JitterConfig::default().with_max_attempts(0);
        let res = assign_jitter(
            &features,
            1_000.0,
            None,
            &config,
            &mut ChaCha8Rng::seed_from_u64(3),
        )
        .unwrap();
        assert_eq!(res.fallback_count(), 3);
        assert_eq!(res.len(), 3);
        assert!(res.iter().all(|(_, o)| o.abs() <= config.max_amplitude));
    }

    #[test]
    fn test_far_apart_features_never_fall_back() {
        let features = genes(&[0, 10_000, 20_000, 30_000]);
        let res = assign_jitter(
            &features,
            40_000.0,
            None,
            &JitterConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(9),
        )
        .unwrap();
        assert_eq!(res.fallback_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let features = genes(&[0]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let bad = JitterConfig::default().with_max_amplitude(0.0);
        assert!(assign_jitter(&features, 1.0, None, &bad, &mut rng).is_err());
        let bad = JitterConfig::default().with_min_distance_from_zero(2.0);
        assert!(assign_jitter(&features, 1.0, None, &bad, &mut rng).is_err());
        assert!(assign_jitter(
            &features,
            f64::NAN,
            None,
            &JitterConfig::default(),
            &mut rng
        )
        .is_err());
    }

    #[test]
    fn test_empty_input() {
        let res = assign_jitter(
            &[],
            1.0,
            Some("missing"),
            &JitterConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(0),
        )
        .unwrap();
        assert!(res.is_empty());
    }
}
