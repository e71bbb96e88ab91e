#![allow(dead_code)]

use bdp_tracks::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::fixture;

pub fn seeded(seed: u64) -> ChaCha8Rng { ChaCha8Rng::seed_from_u64(seed) }

/// `count` genes of random length placed inside `[start, start + span)`.
pub fn random_genes<R: Rng>(
    rng: &mut R,
    count: usize,
    start: PosType,
    span: PosType,
) -> Vec<Feature> {
    (0..count)
        .map(|i| {
            let gene_start = start + rng.gen_range(0..span);
            let length = rng.gen_range(500..20_000);
            let strand = if rng.gen_bool(0.5) {
                Strand::Forward
            }
            else {
                Strand::Reverse
            };
            Feature::gene(format!("GENE{}", i), gene_start, gene_start + length, strand)
                .unwrap()
        })
        .collect()
}

/// Genes packed into a window much narrower than the spacing threshold, so
/// that every pair is a horizontal neighbour.
pub fn clustered_genes(count: usize) -> Vec<Feature> {
    (0..count as PosType)
        .map(|i| {
            Feature::gene(
                format!("CLUSTER{}", i),
                1_000_000 + i * 100,
                1_005_000 + i * 100,
                Strand::Forward,
            )
            .unwrap()
        })
        .collect()
}

/// Samples at positions `0..n` with value equal to the position.
pub fn linear_signal(n: usize) -> Vec<SignalSample> {
    (0..n as PosType)
        .map(|p| SignalSample::new(p, p as f64))
        .collect()
}

pub fn snp_hits<R: Rng>(
    rng: &mut R,
    count: usize,
    start: PosType,
    span: PosType,
) -> Vec<QtlHit> {
    (0..count)
        .map(|i| {
            let snp = Feature::snp(format!("rs{}", i), start + rng.gen_range(0..span)).unwrap();
            let p_value = 10f64.powf(-rng.gen_range(0.0..12.0));
            let beta = rng.gen_range(-1.0..1.0);
            QtlHit::new(snp, p_value, beta).unwrap()
        })
        .collect()
}

#[fixture]
pub fn region_input() -> RegionViewInput {
    let mut rng = seeded(42);
    let region: Region = "chr19:44,900,000-45,000,000".parse().unwrap();
    let genes = random_genes(&mut rng, 12, region.start(), region.length());
    let cell_types = ["Astrocytes", "Microglia", "Neurons"];
    cell_types.iter().fold(
        RegionViewInput::new(region.clone(), cell_types.iter().map(|s| s.to_string()).collect())
            .with_dataset(Some("snATAC".to_string()))
            .with_nearby_genes(genes),
        |input, cell_type| {
            let samples = (0..3_200)
                .map(|i| {
                    SignalSample::new(
                        region.start() + i * 31,
                        rng.gen_range(0.0..4.0),
                    )
                })
                .collect();
            input.with_track(*cell_type, samples)
        },
    )
}

#[fixture]
pub fn gene_input() -> GeneViewInput {
    let mut rng = seeded(7);
    let mut genes = random_genes(&mut rng, 15, 44_000_000, 2_000_000);
    genes.push(Feature::gene("APOE", 44_905_000, 44_909_000, Strand::Forward).unwrap());
    let astro = snp_hits(&mut rng, 40, 44_400_000, 1_000_000);
    let micro = snp_hits(&mut rng, 25, 44_400_000, 1_000_000);
    GeneViewInput::new("APOE", genes)
        .with_track("Astrocytes", astro)
        .with_track("Microglia", micro)
}
