//! Commonly used types and builders.
//!
//! ```
//! use bdp_tracks::prelude::*;
//! ```

pub use crate::data_structs::typedef::*;
pub use crate::data_structs::{
    Feature,
    FeatureKind,
    Interval,
    PointType,
    QtlHit,
    Region,
    SignalSample,
    SignalTracks,
    Strand,
};
pub use crate::plots::{
    build_gene_view,
    build_region_view,
    build_snp_view,
    DisplayOptions,
    Figure,
    GeneViewConfig,
    GeneViewInput,
    LayoutExtras,
    RegionViewConfig,
    RegionViewInput,
    SelectedPoint,
    SelectionDetails,
    SelectionIndex,
    SnpViewConfig,
    SnpViewInput,
};
pub use crate::tools::{
    assign_jitter,
    padded_range,
    prepare_signal,
    value_range,
    AxisRange,
    JitterAssignment,
    JitterConfig,
    PaddingConfig,
    SignalRendering,
    TrackDomains,
    TrackLayoutConfig,
    ValueRangeSpec,
};
pub use crate::{
    LayoutError,
    Result,
};
