use std::fmt::Display;

use serde::Serialize;

use super::enums::{
    FeatureKind,
    Strand,
};
use super::region::Interval;
use super::typedef::PosType;
use crate::error::invalid_input;
use crate::Result;

/// A gene, SNP or peak placed on the shared coordinate axis.
///
/// SNPs are stored as zero-length intervals. Features are immutable once
/// built; every constructor validates the coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Feature {
    id:     String,
    kind:   FeatureKind,
    start:  PosType,
    end:    PosType,
    strand: Strand,
}

impl Feature {
    pub fn new(
        id: impl Into<String>,
        kind: FeatureKind,
        start: PosType,
        end: PosType,
        strand: Strand,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(invalid_input!("feature identifier must not be empty"));
        }
        if start > end {
            return Err(invalid_input!(
                "feature {} ends ({}) before it starts ({})",
                id,
                end,
                start
            ));
        }
        Ok(Self {
            id,
            kind,
            start,
            end,
            strand,
        })
    }

    pub fn gene(
        id: impl Into<String>,
        start: PosType,
        end: PosType,
        strand: Strand,
    ) -> Result<Self> {
        Self::new(id, FeatureKind::Gene, start, end, strand)
    }

    pub fn snp(
        id: impl Into<String>,
        position: PosType,
    ) -> Result<Self> {
        Self::new(id, FeatureKind::Snp, position, position, Strand::None)
    }

    pub fn id(&self) -> &str { self.id.as_str() }

    pub fn kind(&self) -> FeatureKind { self.kind }

    pub fn start(&self) -> PosType { self.start }

    pub fn end(&self) -> PosType { self.end }

    pub fn strand(&self) -> Strand { self.strand }

    /// Anchor position used for ordering and collision checks.
    pub fn position(&self) -> PosType { self.start }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end:   self.end,
        }
    }

    /// Coordinates of the glyph in drawing order: reverse-strand features
    /// are drawn from end to start so the arrow marker lands on the 5' side.
    pub fn glyph_ends(&self) -> (PosType, PosType) {
        match self.strand {
            Strand::Reverse => (self.end, self.start),
            _ => (self.start, self.end),
        }
    }

    pub fn midpoint(&self) -> f64 { (self.start as f64 + self.end as f64) / 2.0 }
}

impl Display for Feature {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}-{}]({})",
            self.kind, self.id, self.start, self.end, self.strand
        )
    }
}

/// A feature carrying a QTL association statistic for one cell type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QtlHit {
    feature: Feature,
    p_value: f64,
    beta:    f64,
}

/// p-values are floored at this value before the log transform.
pub const P_VALUE_FLOOR: f64 = 1e-20;

/// `-log10(p)` with `p` floored at [`P_VALUE_FLOOR`].
pub fn neg_log10(p_value: f64) -> f64 { -(p_value.max(P_VALUE_FLOOR)).log10() }

impl QtlHit {
    pub fn new(
        feature: Feature,
        p_value: f64,
        beta: f64,
    ) -> Result<Self> {
        if !p_value.is_finite() || !(0.0..=1.0).contains(&p_value) {
            return Err(invalid_input!(
                "p-value of {} must be within [0, 1], got {}",
                feature.id(),
                p_value
            ));
        }
        if !beta.is_finite() {
            return Err(invalid_input!(
                "effect size of {} must be finite, got {}",
                feature.id(),
                beta
            ));
        }
        Ok(Self {
            feature,
            p_value,
            beta,
        })
    }

    pub fn feature(&self) -> &Feature { &self.feature }

    pub fn id(&self) -> &str { self.feature.id() }

    pub fn p_value(&self) -> f64 { self.p_value }

    pub fn beta(&self) -> f64 { self.beta }

    pub fn neg_log10_p(&self) -> f64 { neg_log10(self.p_value) }

    /// `-log10(p)` carrying the sign of the effect size.
    pub fn signed_neg_log10_p(&self) -> f64 {
        if self.beta < 0.0 {
            -self.neg_log10_p()
        }
        else if self.beta > 0.0 {
            self.neg_log10_p()
        }
        else {
            0.0
        }
    }
}
