//! Genomic region view: a jittered gene track under one signal track per cell
//! type.

use itertools::Itertools;
use log::info;
use plotly::common::{
    Fill,
    Font,
    Line,
    LineShape,
    Marker,
    Mode,
};
use plotly::layout::{
    Margin,
    ShapeLayer,
};
use plotly::Trace;
use rand::Rng;

use super::color::{
    track_color,
    GREY,
};
use super::format::signal_hovertemplate;
use super::gene_track::{
    label_trace,
    nearby_genes_trace,
};
use super::layout::{
    band,
    base_layout,
    gene_track_axis,
    genomic_axis,
    px,
    sized_title,
    stacked_grid,
    track_label,
    value_axis,
    yaxis_ref,
    LayoutExtras,
};
use super::options::DisplayOptions;
use super::trace::{
    defined,
    scatter,
    XyTrace,
};
use super::{
    plot_config,
    Figure,
};
use crate::data_structs::{
    Feature,
    PointType,
    Region,
    SignalSample,
    SignalTracks,
};
use crate::tools::{
    assign_jitter,
    prepare_signal,
    value_range,
    AxisRange,
    JitterConfig,
    PreparedSignal,
    SignalRendering,
    TrackDomains,
    TrackLayoutConfig,
    ValueRangeSpec,
};
use crate::{
    with_field_fn,
    Result,
};

/// Snapshot of everything the region view draws.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionViewInput {
    pub dataset:      Option<String>,
    pub region:       Region,
    /// Track order, bottom to top above the gene track.
    pub cell_types:   Vec<String>,
    pub signal:       SignalTracks,
    pub nearby_genes: Vec<Feature>,
}

impl RegionViewInput {
    pub fn new(
        region: Region,
        cell_types: Vec<String>,
    ) -> Self {
        Self {
            dataset: None,
            region,
            cell_types,
            signal: SignalTracks::new(),
            nearby_genes: Vec::new(),
        }
    }

    with_field_fn!(dataset, Option<String>);

    with_field_fn!(nearby_genes, Vec<Feature>);

    with_field_fn!(signal, SignalTracks);

    /// Adds the samples of one cell type.
    pub fn with_track(
        mut self,
        cell_type: impl Into<String>,
        samples: Vec<SignalSample>,
    ) -> Self {
        self.signal.insert(cell_type.into(), samples);
        self
    }

    fn samples(
        &self,
        cell_type: &str,
    ) -> &[SignalSample] {
        self.signal
            .get(cell_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionViewConfig {
    pub layout:    TrackLayoutConfig,
    pub jitter:    JitterConfig,
    pub rendering: SignalRendering,
    pub show_grid: bool,
}

impl Default for RegionViewConfig {
    fn default() -> Self { Self::from_options(&DisplayOptions::default()) }
}

impl RegionViewConfig {
    with_field_fn!(layout, TrackLayoutConfig);
    with_field_fn!(jitter, JitterConfig);
    with_field_fn!(rendering, SignalRendering);
    with_field_fn!(show_grid, bool);

    pub fn from_options(options: &DisplayOptions) -> Self {
        Self {
            layout:    options.track_layout(),
            jitter:    JitterConfig::default(),
            rendering: options.rendering(),
            show_grid: options.show_grid(),
        }
    }
}

fn signal_trace(
    cell_type: &str,
    prepared: PreparedSignal,
    color: String,
    yaxis: &str,
) -> Box<XyTrace> {
    let x = defined(prepared.x);
    let y = defined(prepared.y);
    let trace = match prepared.rendering {
        SignalRendering::FullResolution => scatter(x, y, Mode::Lines, yaxis)
            .web_gl_mode(true)
            .fill(Fill::ToZeroY)
            .fill_color(color)
            .line(Line::new().width(0.0).shape(LineShape::Hv)),
        SignalRendering::Binned => scatter(x, y, Mode::Markers, yaxis)
            .marker(Marker::new().size(3).color(color)),
    };
    trace
        .name(cell_type)
        .hover_template(&signal_hovertemplate(cell_type))
        .meta(PointType::Signal.as_str())
}

fn track_title(
    cell_type: &str,
    bin_size: usize,
) -> String {
    if bin_size > 1 {
        format!("{} (mean of {} samples per point)", cell_type, bin_size)
    }
    else {
        cell_type.to_string()
    }
}

/// Builds the region view.
///
/// The gene track is the bottom row (`y`); cell type `i` is drawn on
/// `y{i + 2}`. Genes are jittered against 2% of the region width. Signal is
/// binned unless `config.rendering` asks for full resolution, and the bin
/// size of every binned track is shown in its label.
pub fn build_region_view<R: Rng + ?Sized>(
    input: &RegionViewInput,
    config: &RegionViewConfig,
    rng: &mut R,
) -> Result<Figure> {
    let region = &input.region;
    let domains = TrackDomains::compute(input.cell_types.len() + 1, &config.layout)?;
    let x_range = AxisRange::from(region.interval());

    let offsets = assign_jitter(
        &input.nearby_genes,
        region.length() as f64,
        None,
        &config.jitter,
        rng,
    )?;

    let mut data: Vec<Box<dyn Trace>> = Vec::with_capacity(input.cell_types.len() + 2);
    if !input.nearby_genes.is_empty() {
        let genes = input.nearby_genes.iter().collect_vec();
        data.push(nearby_genes_trace(&genes, &offsets, "y"));
        data.push(label_trace(
            &genes,
            &offsets,
            Font::new().size(10).color(GREY),
            "y",
        ));
    }

    let y_range = value_range(
        input
            .cell_types
            .iter()
            .flat_map(|ct| input.samples(ct).iter().map(|s| s.value)),
        &ValueRangeSpec::SIGNAL,
    );

    let mut extras = LayoutExtras::new();
    extras.set_pan_limits(x_range);
    let mut layout = base_layout()
        .title(sized_title(&format!("<b>{}</b>", region), 20))
        .margin(
            Margin::new()
                .top(px(config.layout.margin_top))
                .bottom(px(config.layout.margin_bottom))
                .left(px(config.layout.margin_left))
                .right(px(config.layout.margin_right)),
        )
        .grid(stacked_grid(domains.len()))
        .x_axis(genomic_axis(
            Some(format!("Genomic Position ({})", region.chromosome()).as_str()),
            x_range,
            config.show_grid,
        ));
    if let Some(height) = domains.total_height() {
        layout = layout.height(px(height));
    }
    layout = extras.set_y_axis(layout, 1, gene_track_axis(domains.get(0)));
    let shapes = vec![band("y", -2.0, 2.0, Some(ShapeLayer::Below))];
    let mut annotations = Vec::with_capacity(input.cell_types.len());

    let n_tracks = input.cell_types.len();
    for (i, cell_type) in input.cell_types.iter().enumerate() {
        let axis_index = i + 2;
        let yref = yaxis_ref(axis_index);
        let domain = domains.get(i + 1);

        let prepared = prepare_signal(input.samples(cell_type), config.rendering)?;
        let bin_size = prepared.bin_size;
        data.push(signal_trace(
            cell_type,
            prepared,
            track_color(i, n_tracks),
            &yref,
        ));

        let axis = value_axis(sized_title("Signal", 10), domain, y_range, config.show_grid)
            .tick_font(Font::new().size(8));
        layout = extras.set_y_axis(layout, axis_index, axis);
        if let Some(domain) = domain {
            annotations.push(track_label(
                &track_title(cell_type, bin_size),
                domain.end,
                13,
            ));
        }
    }
    let layout = layout.shapes(shapes).annotations(annotations);

    let filename = format!(
        "{}.{}.{}-{}",
        input.dataset.as_deref().unwrap_or("region"),
        region.chromosome(),
        region.start(),
        region.end()
    );
    info!(
        "Built region view {} with {} genes and {} tracks",
        region,
        input.nearby_genes.len(),
        n_tracks
    );
    let mut figure = Figure::new(layout, extras, plot_config(&filename));
    figure.add_traces(data);
    Ok(figure)
}
