use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::{
    PosType,
    ValueType,
};

/// One per-position signal measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub position: PosType,
    pub value:    ValueType,
}

impl SignalSample {
    pub fn new(
        position: PosType,
        value: ValueType,
    ) -> Self {
        Self { position, value }
    }
}

impl From<(PosType, ValueType)> for SignalSample {
    fn from((position, value): (PosType, ValueType)) -> Self {
        Self { position, value }
    }
}

/// Signal samples grouped by category key (cell type). Insertion order is
/// kept so tracks stack in the order the backend returned them.
pub type SignalTracks = IndexMap<String, Vec<SignalSample>>;
