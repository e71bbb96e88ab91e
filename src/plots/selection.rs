//! Resolution of clicked points into detail lists.
//!
//! Every clickable trace carries its point type in `meta` and the feature
//! identifier in `customdata`. The front end sends both back and gets a
//! labelled list of the feature's properties.

use std::fmt::Display;

use hashbrown::HashMap;
use serde::{
    Deserialize,
    Serialize,
};

use super::format::{
    format_number,
    MINUS_SIGN,
};
use crate::data_structs::{
    Feature,
    FeatureKind,
    PointType,
    QtlHit,
};

/// A clicked point as reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPoint {
    #[serde(rename = "meta", alias = "pointType")]
    pub point_type: PointType,
    #[serde(rename = "customdata", alias = "id")]
    pub id:         String,
}

impl SelectedPoint {
    pub fn new(
        point_type: PointType,
        id: impl Into<String>,
    ) -> Self {
        Self {
            point_type,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionDetails {
    pub id:      String,
    /// `(label, value)` pairs in display order.
    pub entries: Vec<(String, String)>,
}

impl SelectionDetails {
    fn new(id: &str) -> Self {
        Self {
            id:      id.to_string(),
            entries: Vec::new(),
        }
    }

    fn push(
        &mut self,
        label: impl Into<String>,
        value: impl ToString,
    ) {
        self.entries.push((label.into(), value.to_string()));
    }

    fn push_association(
        &mut self,
        hit: &QtlHit,
    ) {
        self.push("\u{3b2}", format_number(hit.beta(), 6));
        self.push(
            format!("{}log10(p)", MINUS_SIGN),
            format_number(hit.neg_log10_p(), 6),
        );
    }

    pub fn get(
        &self,
        label: &str,
    ) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// `<strong>label:</strong> value` lines joined by `<br />`.
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|(label, value)| format!("<strong>{}:</strong> {}", label, value))
            .collect::<Vec<_>>()
            .join("<br />")
    }
}

impl Display for SelectionDetails {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        for (i, (label, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

/// Features and associations of the current figure, by identifier.
/// A later entry with an already known identifier replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct SelectionIndex {
    features: HashMap<String, Feature>,
    hits:     HashMap<String, QtlHit>,
}

impl SelectionIndex {
    pub fn new() -> Self { Self::default() }

    pub fn with_features<'a, I>(
        mut self,
        features: I,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Feature>, {
        self.features.extend(
            features
                .into_iter()
                .map(|f| (f.id().to_string(), f.clone())),
        );
        self
    }

    pub fn with_hits<'a, I>(
        mut self,
        hits: I,
    ) -> Self
    where
        I: IntoIterator<Item = &'a QtlHit>, {
        self.hits.extend(
            hits.into_iter()
                .map(|h| (h.id().to_string(), h.clone())),
        );
        self
    }

    fn feature(
        &self,
        id: &str,
    ) -> Option<&Feature> {
        self.hits
            .get(id)
            .map(QtlHit::feature)
            .or_else(|| self.features.get(id))
    }

    /// Details of the clicked feature, or [None] for unknown identifiers and
    /// signal points.
    pub fn resolve(
        &self,
        point: &SelectedPoint,
    ) -> Option<SelectionDetails> {
        let feature = self.feature(&point.id)?;
        let hit = self.hits.get(&point.id);
        let mut details = SelectionDetails::new(feature.id());

        match (point.point_type, feature.kind()) {
            (PointType::Gene, kind) if kind != FeatureKind::Snp => {
                details.push(kind.to_string(), feature.id());
                details.push("Start", feature.start());
                details.push("End", feature.end());
                details.push("Strand", feature.strand().label());
            },
            (PointType::Snp, FeatureKind::Snp) => {
                details.push("SNP", feature.id());
                details.push("Position", feature.position());
            },
            _ => return None,
        }
        if let Some(hit) = hit {
            details.push_association(hit);
        }
        Some(details)
    }
}
