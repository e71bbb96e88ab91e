//! Core data structures of the layout engine.
//!
//! Everything here is a transient, in-memory view value: nothing is
//! persisted, and every render pass builds these from the latest fetched
//! payloads.
//!
//! - [`Region`] and [`Interval`]: the visible window and plain coordinate
//!   intervals, including parsing of region strings typed by users.
//! - [`Feature`]: a gene, SNP or peak with validated coordinates, and
//!   [`QtlHit`], a feature carrying a QTL association statistic.
//! - [`SignalSample`] / [`SignalTracks`]: per-position signal grouped by
//!   cell type.
//! - [`payload`]: the loosely typed backend record shapes and their one-time
//!   conversion into the types above.
//! - [`typedef`]: numeric type aliases.

mod enums;
mod feature;
pub mod payload;
mod region;
mod signal;
pub mod typedef;

pub use enums::{
    FeatureKind,
    PointType,
    Strand,
};
pub use feature::{
    neg_log10,
    Feature,
    QtlHit,
    P_VALUE_FLOOR,
};
pub use region::{
    Interval,
    Region,
    BACKEND_BIN_FRACTION,
    FETCH_PADDING_FRACTION,
};
pub use signal::{
    SignalSample,
    SignalTracks,
};
