use indexmap::IndexMap;
use plotly::common::{
    Anchor,
    AxisSide,
    DashType,
    Font,
    Title,
};
use plotly::layout::{
    Annotation,
    Axis,
    DragMode,
    Layout,
    LayoutGrid,
    RowOrder,
    Shape,
    ShapeLayer,
    ShapeLine,
    ShapeType,
    TicksDirection,
};
use serde_json::{
    Map,
    Value,
};

use crate::tools::{
    AxisRange,
    TrackDomain,
};
use crate::Result;

pub const AXIS_COLOR: &str = "black";
pub const BAND_COLOR: &str = "lightgray";

/// Last y axis [`Layout`] has a setter for.
pub const MAX_LAYOUT_Y_AXES: usize = 8;

/// Key of the `index`-th y axis in a layout (`yaxis`, `yaxis2`, ...).
pub fn yaxis_key(index: usize) -> String {
    match index {
        0 | 1 => "yaxis".to_string(),
        i => format!("yaxis{}", i),
    }
}

/// Trace reference of the `index`-th y axis (`y`, `y2`, ...).
pub fn yaxis_ref(index: usize) -> String {
    match index {
        0 | 1 => "y".to_string(),
        i => format!("y{}", i),
    }
}

/// Whole pixels for a layout size.
pub fn px(value: f64) -> usize { value.max(0.0).round() as usize }

pub fn sized_title(
    text: &str,
    size: usize,
) -> Title {
    Title::with_text(text).font(Font::new().size(size))
}

/// Framed axis with a fixed range and ticks in `ticks` direction.
fn framed(ticks: Option<TicksDirection>) -> Axis {
    let axis = Axis::new()
        .auto_range(false)
        .zero_line(false)
        .show_line(true)
        .mirror(true)
        .line_width(1)
        .line_color(AXIS_COLOR);
    match ticks {
        Some(direction) => axis
            .ticks(direction)
            .tick_length(6)
            .tick_width(1)
            .tick_color(AXIS_COLOR),
        None => axis,
    }
}

fn domain_of(
    axis: Axis,
    domain: Option<TrackDomain>,
) -> Axis {
    match domain {
        Some(domain) => axis.domain(&[domain.start, domain.end]),
        None => axis,
    }
}

fn range_of(range: AxisRange) -> Vec<f64> { vec![range.min, range.max] }

/// Shared genomic x axis with inside ticks.
pub fn genomic_axis(
    title: Option<&str>,
    range: AxisRange,
    show_grid: bool,
) -> Axis {
    let axis = framed(Some(TicksDirection::Inside))
        .range(range_of(range))
        .tick_font(Font::new().size(10))
        .show_grid(show_grid)
        .side(AxisSide::Bottom)
        .anchor("y");
    match title {
        Some(title) => axis.title(Title::with_text(title)),
        None => axis,
    }
}

/// Gene track axis: fixed `[-2, 2]`, no ticks.
pub fn gene_track_axis(domain: Option<TrackDomain>) -> Axis {
    let axis = framed(None)
        .range(vec![-2.0, 2.0])
        .fixed_range(true)
        .show_grid(false)
        .show_tick_labels(false)
        .anchor("x");
    domain_of(axis, domain)
}

/// Value axis of one data track.
pub fn value_axis(
    title: Title,
    domain: Option<TrackDomain>,
    range: AxisRange,
    show_grid: bool,
) -> Axis {
    let axis = framed(Some(TicksDirection::Outside))
        .title(title)
        .range(range_of(range))
        .fixed_range(true)
        .show_grid(show_grid)
        .anchor("x");
    domain_of(axis, domain)
}

/// Free value axis of a single-panel figure: outside ticks, zoomable.
pub fn free_value_axis(
    title: Title,
    range: AxisRange,
) -> Axis {
    framed(Some(TicksDirection::Outside))
        .title(title)
        .range(range_of(range))
        .show_grid(false)
}

/// Grey horizontal band spanning the plot width between `y0` and `y1`.
pub fn band(
    yref: &str,
    y0: f64,
    y1: f64,
    layer: Option<ShapeLayer>,
) -> Shape {
    let shape = Shape::new()
        .shape_type(ShapeType::Rect)
        .x_ref("paper")
        .y_ref(yref)
        .x0(0.0)
        .x1(1.0)
        .y0(y0)
        .y1(y1)
        .fill_color(BAND_COLOR)
        .opacity(0.3)
        .line(ShapeLine::new().width(0.0));
    match layer {
        Some(layer) => shape.layer(layer),
        None => shape,
    }
}

/// Horizontal rule at `y`.
pub fn hline(
    yref: &str,
    y: f64,
    dash: Option<DashType>,
) -> Shape {
    let line = ShapeLine::new().color(AXIS_COLOR).width(1.0);
    Shape::new()
        .shape_type(ShapeType::Line)
        .x_ref("paper")
        .y_ref(yref)
        .x0(0.0)
        .x1(1.0)
        .y0(y)
        .y1(y)
        .layer(ShapeLayer::Below)
        .line(match dash {
            Some(dash) => line.dash(dash),
            None => line,
        })
}

/// Track name in the top left corner of a track whose domain ends at `top`.
pub fn track_label(
    text: &str,
    top: f64,
    font_size: usize,
) -> Annotation {
    Annotation::new()
        .text(text)
        .font(Font::new().size(font_size))
        .x_ref("paper")
        .y_ref("paper")
        .x(0.001)
        .y(top)
        .show_arrow(false)
        .x_anchor(Anchor::Left)
        .y_anchor(Anchor::Top)
}

/// Transparent, legend-less, pannable base layout.
pub fn base_layout() -> Layout {
    Layout::new()
        .paper_background_color("rgba(0,0,0,0)")
        .show_legend(false)
        .auto_size(true)
        .drag_mode(DragMode::Pan)
}

pub fn stacked_grid(rows: usize) -> LayoutGrid {
    LayoutGrid::new()
        .rows(rows)
        .columns(1)
        .row_order(RowOrder::TopToBottom)
}

/// Layout keys [`Layout`] cannot set: y axes past `yaxis8` and the pan
/// limits (`minallowed`, `maxallowed`) of the x axis.
#[derive(Debug, Clone, Default)]
pub struct LayoutExtras {
    y_axes:     IndexMap<String, Axis>,
    pan_limits: Option<AxisRange>,
}

impl LayoutExtras {
    pub fn new() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool {
        self.y_axes.is_empty() && self.pan_limits.is_none()
    }

    pub fn pan_limits(&self) -> Option<AxisRange> { self.pan_limits }

    pub fn set_pan_limits(
        &mut self,
        limits: AxisRange,
    ) {
        self.pan_limits = Some(limits);
    }

    /// Sets the `index`-th y axis (1-based, `1` is `yaxis`) on `layout`, or
    /// keeps it here when `layout` has no setter for it.
    pub fn set_y_axis(
        &mut self,
        layout: Layout,
        index: usize,
        axis: Axis,
    ) -> Layout {
        match index {
            0 | 1 => layout.y_axis(axis),
            2 => layout.y_axis2(axis),
            3 => layout.y_axis3(axis),
            4 => layout.y_axis4(axis),
            5 => layout.y_axis5(axis),
            6 => layout.y_axis6(axis),
            7 => layout.y_axis7(axis),
            8 => layout.y_axis8(axis),
            i => {
                self.y_axes.insert(yaxis_key(i), axis);
                layout
            },
        }
    }

    /// The extras as a `Plotly.relayout` update: whole axes by key, pan
    /// limits as dotted `xaxis.*` paths.
    pub fn relayout_update(&self) -> Result<Map<String, Value>> {
        let mut update = Map::new();
        for (key, axis) in self.y_axes.iter() {
            update.insert(key.clone(), serde_json::to_value(axis)?);
        }
        if let Some(limits) = self.pan_limits {
            update.insert("xaxis.minallowed".to_string(), limits.min.into());
            update.insert("xaxis.maxallowed".to_string(), limits.max.into());
        }
        Ok(update)
    }

    /// Merges the extras into a serialized layout.
    pub fn apply(
        &self,
        layout: &mut Value,
    ) -> Result<()> {
        for (path, value) in self.relayout_update()? {
            match path.split_once('.') {
                Some((parent, key)) => layout[parent][key] = value,
                None => layout[path.as_str()] = value,
            }
        }
        Ok(())
    }
}
