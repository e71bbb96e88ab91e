//! Layout algorithms of the track engine.
//!
//! All functions here are pure: they take immutable inputs and return new
//! values. The only source of non-determinism is the random number generator
//! handed to [`jitter::assign_jitter`].

pub mod domain;
pub mod downsample;
pub mod jitter;
pub mod padding;

pub use domain::{
    TrackDomain,
    TrackDomains,
    TrackLayoutConfig,
};
pub use downsample::{
    bin_size_for,
    downsample,
    prepare_signal,
    BinnedPoint,
    PreparedSignal,
    SignalRendering,
};
pub use jitter::{
    assign_jitter,
    JitterAssignment,
    JitterConfig,
};
pub use padding::{
    padded_range,
    value_range,
    AxisRange,
    PaddingConfig,
    ValueRangeSpec,
};
