//! Backend payload shapes.
//!
//! The portal backend returns loosely typed JSON: coordinates sometimes come
//! as strings, strand may be missing, peaks are marked with strand `x`. The
//! records below accept those shapes and are converted exactly once into the
//! typed values of this crate, so the layout tools never see malformed
//! numbers.

use log::debug;
use serde::de::{
    DeserializeOwned,
    Error as DeError,
};
use serde::{
    Deserialize,
    Deserializer,
};

use super::enums::{
    FeatureKind,
    Strand,
};
use super::feature::{
    Feature,
    QtlHit,
};
use super::signal::SignalSample;
use super::typedef::{
    PosType,
    ValueType,
};
use crate::{
    LayoutError,
    Result,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn position_from_f64<E: DeError>(value: f64) -> std::result::Result<PosType, E> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as PosType)
    }
    else {
        Err(E::custom(format!("{} is not an integer coordinate", value)))
    }
}

fn de_position<'de, D>(deserializer: D) -> std::result::Result<PosType, D::Error>
where
    D: Deserializer<'de>, {
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(v) => Ok(v),
        RawNumber::Float(v) => position_from_f64(v),
        RawNumber::Text(s) => {
            let s = s.trim().replace(',', "");
            match s.parse::<PosType>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    let v = s.parse::<f64>().map_err(|_| {
                        D::Error::custom(format!("'{}' is not a coordinate", s))
                    })?;
                    position_from_f64(v)
                },
            }
        },
    }
}

fn de_value<'de, D>(deserializer: D) -> std::result::Result<ValueType, D::Error>
where
    D: Deserializer<'de>, {
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(v) => v as f64,
        RawNumber::Float(v) => v,
        RawNumber::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("'{}' is not a number", s)))?,
    };
    if value.is_nan() {
        return Err(D::Error::custom("NaN is not a valid value"));
    }
    Ok(value)
}

fn payload_error(err: LayoutError) -> LayoutError {
    match err {
        LayoutError::InvalidInput(msg) => LayoutError::Payload(msg),
        other => other,
    }
}

fn kind_and_strand(strand: Option<&str>) -> (FeatureKind, Strand) {
    match strand.map(str::trim) {
        Some("x") | Some("X") => (FeatureKind::Peak, Strand::None),
        Some(s) => (FeatureKind::Gene, s.parse().unwrap_or_default()),
        None => (FeatureKind::Gene, Strand::None),
    }
}

/// Gene (or peak) location row.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneLocationRecord {
    pub gene_id:        String,
    #[serde(deserialize_with = "de_position")]
    pub position_start: PosType,
    #[serde(deserialize_with = "de_position")]
    pub position_end:   PosType,
    #[serde(default)]
    pub strand:         Option<String>,
}

impl TryFrom<GeneLocationRecord> for Feature {
    type Error = LayoutError;

    fn try_from(value: GeneLocationRecord) -> Result<Self> {
        let (kind, strand) = kind_and_strand(value.strand.as_deref());
        Feature::new(
            value.gene_id,
            kind,
            value.position_start,
            value.position_end,
            strand,
        )
        .map_err(payload_error)
    }
}

/// SNP location row.
#[derive(Debug, Clone, Deserialize)]
pub struct SnpLocationRecord {
    pub snp_id:   String,
    #[serde(deserialize_with = "de_position")]
    pub position: PosType,
}

impl TryFrom<SnpLocationRecord> for Feature {
    type Error = LayoutError;

    fn try_from(value: SnpLocationRecord) -> Result<Self> {
        Feature::snp(value.snp_id, value.position).map_err(payload_error)
    }
}

/// Signal row of one cell type.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SignalRecord {
    #[serde(deserialize_with = "de_position")]
    pub position: PosType,
    #[serde(deserialize_with = "de_value")]
    pub value:    ValueType,
}

impl From<SignalRecord> for SignalSample {
    fn from(value: SignalRecord) -> Self {
        SignalSample::new(value.position, value.value)
    }
}

/// SNP-level association row returned for a gene query.
#[derive(Debug, Clone, Deserialize)]
pub struct SnpAssociationRecord {
    pub snp_id:     String,
    #[serde(deserialize_with = "de_value")]
    pub p_value:    f64,
    #[serde(deserialize_with = "de_value")]
    pub beta_value: f64,
    #[serde(deserialize_with = "de_position")]
    pub position:   PosType,
}

impl TryFrom<SnpAssociationRecord> for QtlHit {
    type Error = LayoutError;

    fn try_from(value: SnpAssociationRecord) -> Result<Self> {
        let feature =
            Feature::snp(value.snp_id, value.position).map_err(payload_error)?;
        QtlHit::new(feature, value.p_value, value.beta_value)
            .map_err(payload_error)
    }
}

/// Gene-level association row returned for a SNP query.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneAssociationRecord {
    pub gene_id:        String,
    #[serde(deserialize_with = "de_value")]
    pub p_value:        f64,
    #[serde(deserialize_with = "de_value")]
    pub beta_value:     f64,
    #[serde(deserialize_with = "de_position")]
    pub position_start: PosType,
    #[serde(deserialize_with = "de_position")]
    pub position_end:   PosType,
    #[serde(default)]
    pub strand:         Option<String>,
}

impl TryFrom<GeneAssociationRecord> for QtlHit {
    type Error = LayoutError;

    fn try_from(value: GeneAssociationRecord) -> Result<Self> {
        let (kind, strand) = kind_and_strand(value.strand.as_deref());
        let feature = Feature::new(
            value.gene_id,
            kind,
            value.position_start,
            value.position_end,
            strand,
        )
        .map_err(payload_error)?;
        QtlHit::new(feature, value.p_value, value.beta_value)
            .map_err(payload_error)
    }
}

/// Converts every record, failing on the first malformed one.
pub fn convert_records<R, T>(records: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = LayoutError>, {
    let total = records.len();
    let converted = records
        .into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<T>>>()?;
    debug!("Converted {} payload records", total);
    Ok(converted)
}

/// Parses a JSON array of records and converts them.
pub fn parse_records<R, T>(json: &str) -> Result<Vec<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = LayoutError>, {
    let records: Vec<R> = serde_json::from_str(json)?;
    convert_records(records)
}
