use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Default)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// No strand (SNPs, peaks).
    #[default]
    None,
}

impl Strand {
    /// Label used in hover text. Uses a typographic minus sign.
    pub fn label(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "\u{2212}",
            Strand::None => "N/A",
        }
    }
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Ok(Strand::None),
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::None => write!(f, "."),
        }
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => FromStr::from_str(&s).map_err(serde::de::Error::custom),
            None => Ok(Strand::None),
        }
    }
}

/// What a [`Feature`](super::Feature) stands for.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Gene,
    Snp,
    /// Chromatin accessibility peak. The backend marks those with strand `x`.
    Peak,
}

impl Display for FeatureKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FeatureKind::Gene => write!(f, "Gene"),
            FeatureKind::Snp => write!(f, "SNP"),
            FeatureKind::Peak => write!(f, "Peak"),
        }
    }
}

/// Tag attached to every interactive trace, used to resolve clicks back to
/// the underlying record.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Gene,
    Snp,
    Signal,
}

impl PointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Gene => "gene",
            PointType::Snp => "snp",
            PointType::Signal => "signal",
        }
    }
}
