//! JSON snapshots of the data the portal fetched for one view.

use bdp_tracks::data_structs::payload::{
    convert_records,
    GeneAssociationRecord,
    GeneLocationRecord,
    SignalRecord,
    SnpAssociationRecord,
    SnpLocationRecord,
};
use bdp_tracks::prelude::*;
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use serde::Deserialize;

/// Either `"chr1:1,000-2,000"` or `{"chromosome": .., "start": .., "end": ..}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RegionSpec {
    Text(String),
    Fields(Region),
}

impl RegionSpec {
    pub fn into_region(self) -> Result<Region> {
        match self {
            RegionSpec::Text(text) => text.parse(),
            RegionSpec::Fields(region) => Ok(region),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegionSnapshot {
    #[serde(default)]
    pub dataset:    Option<String>,
    pub region:     RegionSpec,
    /// Track order. Defaults to the order of `signal`.
    #[serde(default)]
    pub cell_types: Option<Vec<String>>,
    #[serde(default)]
    pub genes:      Vec<GeneLocationRecord>,
    #[serde(default)]
    pub signal:     IndexMap<String, Vec<SignalRecord>>,
}

impl RegionSnapshot {
    pub fn into_input(self) -> Result<RegionViewInput> {
        let region = self.region.into_region()?;
        let cell_types = self
            .cell_types
            .unwrap_or_else(|| self.signal.keys().cloned().collect_vec());
        let signal: SignalTracks = self
            .signal
            .into_iter()
            .map(|(cell_type, records)| {
                (
                    cell_type,
                    records.into_iter().map(SignalSample::from).collect_vec(),
                )
            })
            .collect();
        let genes: Vec<Feature> = convert_records(self.genes)?;
        debug!(
            "Region snapshot {} with {} genes and {} signal tracks",
            region,
            genes.len(),
            signal.len()
        );

        Ok(RegionViewInput::new(region, cell_types)
            .with_dataset(self.dataset)
            .with_nearby_genes(genes)
            .with_signal(signal))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeneSnapshot {
    pub gene:         String,
    pub genes:        Vec<GeneLocationRecord>,
    /// SNP associations of `gene` per cell type, in track order.
    #[serde(default)]
    pub associations: IndexMap<String, Vec<SnpAssociationRecord>>,
}

impl GeneSnapshot {
    pub fn into_input(self) -> Result<GeneViewInput> {
        let genes: Vec<Feature> = convert_records(self.genes)?;
        self.associations.into_iter().try_fold(
            GeneViewInput::new(self.gene, genes),
            |input, (cell_type, records)| {
                let hits: Vec<QtlHit> = convert_records(records)?;
                Ok(input.with_track(cell_type, hits))
            },
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SnpSnapshot {
    pub snp:       String,
    pub cell_type: String,
    pub snps:      Vec<SnpLocationRecord>,
    #[serde(default)]
    pub genes:     Vec<GeneAssociationRecord>,
}

impl SnpSnapshot {
    pub fn into_input(self) -> Result<SnpViewInput> {
        Ok(SnpViewInput::new(
            self.snp,
            self.cell_type,
            convert_records(self.snps)?,
            convert_records(self.genes)?,
        ))
    }
}
