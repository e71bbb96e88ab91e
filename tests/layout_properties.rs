mod common;

use bdp_tracks::prelude::*;
use bdp_tracks::tools::downsample::{
    bin_size_for,
    downsample,
    is_monotonic,
};
use common::{
    clustered_genes,
    linear_signal,
    random_genes,
    seeded,
};
use itertools::Itertools;
use rand::Rng;
use rstest::rstest;

#[rstest]
#[case(1)]
#[case(2)]
#[case(17)]
#[case(500)]
fn padded_range_contains_observed(#[case] count: usize) {
    let mut rng = seeded(count as u64);
    for _ in 0..50 {
        // odd positions never sit on the kilobase grid
        let positions = (0..count)
            .map(|_| rng.gen_range(0..50_000_000) | 1)
            .collect_vec();
        let (min, max) = positions.iter().minmax().into_option().unwrap();
        let range = padded_range(&positions, None, &PaddingConfig::default()).unwrap();
        assert!(range.covers(&AxisRange::new(*min as f64, *max as f64)));
        assert!(range.min < range.max);
    }
}

#[test]
fn padded_range_respects_radius() {
    let mut rng = seeded(99);
    let config = PaddingConfig::default().with_radius(Some(250_000));
    for _ in 0..200 {
        let focus_start = rng.gen_range(1_000_000..2_000_000);
        let focus = Interval::new(focus_start, focus_start + rng.gen_range(0..50_000));
        let positions = (0..20)
            .map(|_| rng.gen_range(0..4_000_000))
            .chain([focus.start, focus.end])
            .collect_vec();
        let range = padded_range(&positions, Some(focus), &config).unwrap();
        assert!(range.min >= (focus.start - 250_000) as f64);
        assert!(range.max <= (focus.end + 250_000) as f64);
    }
}

#[test]
fn jitter_spacing_holds_for_clustered_features() {
    let config = JitterConfig::default();
    let features = clustered_genes(8);
    let span = 1_000_000.0;
    let min_x = span * config.x_spacing_fraction;

    let mut checked = 0usize;
    let mut satisfied = 0usize;
    for seed in 0..20 {
        let offsets =
            assign_jitter(&features, span, None, &config, &mut seeded(seed)).unwrap();
        for (a, b) in features
            .iter()
            .filter(|f| !offsets.is_fallback(f.id()))
            .tuple_combinations()
        {
            if ((a.position() - b.position()) as f64).abs() >= min_x {
                continue;
            }
            checked += 1;
            let dy = (offsets.offset_or_zero(a.id()) - offsets.offset_or_zero(b.id())).abs();
            if dy >= config.min_y_spacing {
                satisfied += 1;
            }
        }
    }
    assert!(checked > 0);
    assert!(satisfied as f64 >= 0.95 * checked as f64);
}

#[rstest]
#[case(None)]
#[case(Some("GENE3"))]
fn jitter_assigns_every_feature(#[case] focal: Option<&str>) {
    let mut rng = seeded(5);
    let features = random_genes(&mut rng, 60, 0, 100_000);
    let config = JitterConfig::default();
    let offsets = assign_jitter(&features, 100_000.0, focal, &config, &mut rng).unwrap();

    assert_eq!(offsets.len(), features.len());
    for feature in features.iter() {
        let offset = offsets.get(feature.id()).unwrap();
        assert!(offset.abs() <= config.max_amplitude);
    }
    if let Some(focal) = focal {
        assert_eq!(offsets.get(focal), Some(0.0));
    }
}

#[test]
fn jitter_is_reproducible_with_seed() {
    let features = random_genes(&mut seeded(1), 30, 0, 1_000_000);
    let config = JitterConfig::default();
    let a = assign_jitter(&features, 1e6, None, &config, &mut seeded(8)).unwrap();
    let b = assign_jitter(&features, 1e6, None, &config, &mut seeded(8)).unwrap();
    assert_eq!(a, b);
}

#[rstest]
#[case(1)]
#[case(999)]
#[case(1_000)]
#[case(2_500)]
#[case(10_001)]
fn downsample_length_and_means(#[case] n: usize) {
    let samples = linear_signal(n);
    let bin = bin_size_for(n);
    let points = downsample(&samples, bin).unwrap();

    assert_eq!(points.len(), n.div_ceil(bin));
    assert!(is_monotonic(&points));
    for (point, chunk) in points.iter().zip(samples.chunks(bin)) {
        let mean = chunk.iter().map(|s| s.value).sum::<f64>() / chunk.len() as f64;
        assert_eq!(point.value, mean);
        assert_eq!(point.position, mean);
    }
}

#[test]
fn downsample_reference_case() {
    let points = downsample(&linear_signal(2_500), bin_size_for(2_500)).unwrap();
    assert_eq!(bin_size_for(2_500), 2);
    assert_eq!(points.len(), 1_250);
    assert_eq!((points[0].position, points[0].value), (0.5, 0.5));
    let last = points.last().unwrap();
    assert_eq!((last.position, last.value), (2_498.5, 2_498.5));
}

#[test]
fn track_domains_do_not_overlap() {
    let domains = TrackDomains::compute(4, &TrackLayoutConfig::default()).unwrap();
    assert_eq!(domains.total_height(), Some(390.0));

    let all = domains.domains();
    assert_eq!(all.len(), 4);
    for domain in all.iter() {
        assert!(domain.start >= 0.0 && domain.end <= 1.0);
        assert!(domain.start < domain.end);
    }
    for (lower, upper) in all.iter().tuple_windows() {
        assert!(lower.end < upper.start);
    }
    assert!(all[3].end <= 1.0);
}

#[rstest]
#[case(37.0, 2)]
#[case(37.0, 49)]
#[case(13.0, 399)]
#[case(50.0, 7)]
fn gapless_track_domains_do_not_overlap(
    #[case] track_height: f64,
    #[case] max_tracks: usize,
) {
    let config = TrackLayoutConfig::default()
        .with_track_height(track_height)
        .with_gap_height(0.0);
    for n in 1..=max_tracks {
        let domains = TrackDomains::compute(n, &config).unwrap();
        for (lower, upper) in domains.domains().iter().tuple_windows() {
            assert!(lower.end <= upper.start, "{} tracks: {:?} {:?}", n, lower, upper);
        }
        assert!(domains.domains().iter().all(|d| d.start < d.end && d.end <= 1.0));
    }
}

#[test]
fn layout_is_idempotent() {
    let positions = [12_345, 67_890, 33_333];
    let config = PaddingConfig::default().with_radius(Some(40_000));
    let focus = Some(Interval::new(30_000, 35_000));
    let a = padded_range(&positions, focus, &config).unwrap();
    let b = padded_range(&positions, focus, &config).unwrap();
    assert_eq!(a.min.to_bits(), b.min.to_bits());
    assert_eq!(a.max.to_bits(), b.max.to_bits());

    let layout = TrackLayoutConfig::default().with_track_height(73.0);
    let a = TrackDomains::compute(7, &layout).unwrap();
    let b = TrackDomains::compute(7, &layout).unwrap();
    for (x, y) in a.domains().iter().zip(b.domains()) {
        assert_eq!(x.start.to_bits(), y.start.to_bits());
        assert_eq!(x.end.to_bits(), y.end.to_bits());
    }
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert!(matches!(
        padded_range(&[], None, &PaddingConfig::default()),
        Err(LayoutError::InvalidInput(_))
    ));
    assert!(matches!(
        padded_range(&[7_000], None, &PaddingConfig::default()),
        Err(LayoutError::InvalidInput(_))
    ));
    assert!(TrackDomains::compute(0, &TrackLayoutConfig::default()).is_err());
    assert!(downsample(&linear_signal(10), 0).is_err());
    assert!("chr1:2000-1000".parse::<Region>().is_err());
}
