//! # bdp-tracks
//!
//! `bdp-tracks` is the layout engine behind the genome-browser style plots of
//! the brain data portal. It takes already fetched, already validated
//! backend payloads (gene and SNP locations, per-cell-type QTL associations,
//! per-cell-type signal arrays) and prepares declarative, Plotly-compatible
//! figure descriptors out of them.
//!
//! The engine is a set of pure functions:
//!
//! * [`tools::padding`]: visible coordinate range with padding, rounding and an
//!   optional radius clamp around a focal feature.
//! * [`tools::jitter`]: collision-avoiding vertical offsets for gene and SNP
//!   glyphs, driven by an injected random source.
//! * [`tools::downsample`]: positional binning of dense signal tracks.
//! * [`tools::domain`]: normalized vertical domains for stacked track rows.
//!
//! On top of those, [`plots`] assembles complete figures for the three region
//! views of the portal (genomic region, gene-centric and SNP-centric).
//!
//! ## Structure
//!
//! * [`data_structs`]: typed records for regions, features, QTL hits and
//!   signal samples, plus the serde payload shapes of the backend.
//! * [`tools`]: the layout algorithms.
//! * [`plots`]: trace / layout descriptors and figure builders.
//! * [`utils`]: rounding helpers and struct macros.
//!
//! ## Usage
//!
//! ```no_run
//! use bdp_tracks::prelude::*;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let region: Region = "chr1:1,000,000-1,200,000".parse()?;
//!     let genes = vec![
//!         Feature::gene("GENE1", 1_010_000, 1_050_000, Strand::Forward)?,
//!         Feature::gene("GENE2", 1_100_000, 1_180_000, Strand::Reverse)?,
//!     ];
//!     let input = RegionViewInput::new(region, vec!["Astrocytes".into()])
//!         .with_nearby_genes(genes);
//!     let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!     let figure = build_region_view(&input, &RegionViewConfig::default(), &mut rng)?;
//!     println!("{}", figure.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod data_structs;
mod error;
pub mod exports;
pub mod plots;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use error::{
    LayoutError,
    Result,
};
