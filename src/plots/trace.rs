//! Scatter traces on the shared genomic x axis.
//!
//! Every trace is a [`plotly::Scatter`] over optional coordinates, so that
//! `None` breaks a polyline. Clickable traces carry their [`PointType`] in
//! `meta` and one feature identifier per point in `customdata`.

use plotly::common::Mode;
use plotly::Scatter;

use crate::data_structs::PointType;

/// Optional coordinates; `None` is serialized as `null`.
pub type Coords = Vec<Option<f64>>;
pub type XyTrace = Scatter<Option<f64>, Option<f64>>;

/// Fully defined coordinates.
pub fn defined<I>(values: I) -> Coords
where
    I: IntoIterator<Item = f64>, {
    values.into_iter().map(Some).collect()
}

/// Scatter of `mode` on the axis pair `x` / `yaxis`.
pub fn scatter(
    x: Coords,
    y: Coords,
    mode: Mode,
    yaxis: &str,
) -> Box<XyTrace> {
    Scatter::new(x, y)
        .mode(mode)
        .x_axis("x")
        .y_axis(yaxis)
}

/// Tags `trace` for click resolution.
pub fn clickable(
    trace: Box<XyTrace>,
    point_type: PointType,
    ids: Vec<String>,
) -> Box<XyTrace> {
    trace.meta(point_type.as_str()).custom_data(ids)
}
