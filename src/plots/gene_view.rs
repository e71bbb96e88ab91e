//! Gene-centric view: the focal gene and its neighbours above one SNP
//! association track per cell type.

use indexmap::IndexMap;
use itertools::Itertools;
use log::info;
use plotly::common::{
    Font,
    HoverInfo,
    Line,
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
    BetaScale,
    BLACK,
    SIGNIFICANCE_THRESHOLD,
};
use super::format::snp_association_hover;
use super::gene_track::{
    focal_gene_trace,
    label_trace,
    nearby_genes_trace,
};
use super::layout::{
    band,
    base_layout,
    gene_track_axis,
    genomic_axis,
    sized_title,
    stacked_grid,
    track_label,
    value_axis,
    yaxis_ref,
    LayoutExtras,
};
use super::trace::{
    clickable,
    defined,
    scatter,
    XyTrace,
};
use super::{
    plot_config,
    Figure,
};
use crate::data_structs::typedef::PosType;
use crate::data_structs::{
    Feature,
    PointType,
    QtlHit,
};
use crate::error::invalid_input;
use crate::tools::{
    assign_jitter,
    padded_range,
    value_range,
    AxisRange,
    JitterConfig,
    PaddingConfig,
    TrackDomains,
    ValueRangeSpec,
};
use crate::{
    with_field_fn,
    Result,
};

/// Genes closer than this to the focal gene are shown.
pub const GENE_VIEW_RADIUS: PosType = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneViewInput {
    /// Identifier of the focal gene; must be one of `genes`.
    pub gene:         String,
    pub genes:        Vec<Feature>,
    pub cell_types:   Vec<String>,
    /// SNP associations of the focal gene per cell type.
    pub associations: IndexMap<String, Vec<QtlHit>>,
}

impl GeneViewInput {
    pub fn new(
        gene: impl Into<String>,
        genes: Vec<Feature>,
    ) -> Self {
        Self {
            gene: gene.into(),
            genes,
            cell_types: Vec::new(),
            associations: IndexMap::new(),
        }
    }

    /// Appends a cell type track with its associations.
    pub fn with_track(
        mut self,
        cell_type: impl Into<String>,
        hits: Vec<QtlHit>,
    ) -> Self {
        let cell_type = cell_type.into();
        self.cell_types.push(cell_type.clone());
        self.associations.insert(cell_type, hits);
        self
    }

    fn hits(
        &self,
        cell_type: &str,
    ) -> &[QtlHit] {
        self.associations
            .get(cell_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn all_hits(&self) -> impl Iterator<Item = &QtlHit> + '_ {
        self.cell_types.iter().flat_map(|ct| self.hits(ct))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneViewConfig {
    pub padding:   PaddingConfig,
    pub jitter:    JitterConfig,
    /// Normalized gap between track rows.
    pub spacing:   f64,
    pub show_grid: bool,
}

impl GeneViewConfig {
    with_field_fn!(padding, PaddingConfig);
    with_field_fn!(jitter, JitterConfig);
    with_field_fn!(spacing, f64);
    with_field_fn!(show_grid, bool);
}

impl Default for GeneViewConfig {
    fn default() -> Self {
        Self {
            padding:   PaddingConfig::default().with_radius(Some(GENE_VIEW_RADIUS)),
            jitter:    JitterConfig::around_focus(),
            spacing:   0.02,
            show_grid: true,
        }
    }
}

fn association_trace(
    cell_type: &str,
    hits: &[QtlHit],
    scale: &BetaScale,
    yaxis: &str,
) -> Box<XyTrace> {
    let y = hits.iter().map(QtlHit::neg_log10_p).collect_vec();
    let marker = Marker::new()
        .color_array(
            hits.iter()
                .zip(y.iter())
                .map(|(h, y)| scale.color(h.beta(), *y))
                .collect_vec(),
        )
        .size_array(
            y.iter()
                .map(|y| if y.abs() < SIGNIFICANCE_THRESHOLD { 8 } else { 10 })
                .collect_vec(),
        )
        .opacity(1.0)
        .line(Line::new().width(0.2));

    let trace = scatter(
        defined(hits.iter().map(|h| h.feature().position() as f64)),
        defined(y.iter().copied()),
        Mode::Markers,
        yaxis,
    )
    .name(cell_type)
    .marker(marker)
    .hover_info(HoverInfo::Text)
    .text_array(hits.iter().map(snp_association_hover).collect_vec());
    clickable(
        trace,
        PointType::Snp,
        hits.iter().map(|h| h.id().to_string()).collect(),
    )
}

/// Builds the gene-centric view.
///
/// The x range covers the SNPs and the focal gene, padded and clamped to the
/// configured radius around the gene. Panning is limited to the padded span
/// of all nearby genes. The focal gene is drawn at 0 and the other genes are
/// jittered away from it.
pub fn build_gene_view<R: Rng + ?Sized>(
    input: &GeneViewInput,
    config: &GeneViewConfig,
    rng: &mut R,
) -> Result<Figure> {
    let focal = input
        .genes
        .iter()
        .find(|g| g.id() == input.gene)
        .ok_or_else(|| invalid_input!("gene {} is not among the nearby genes", input.gene))?;

    let positions = input
        .all_hits()
        .map(|h| h.feature().position())
        .chain([focal.start(), focal.end()])
        .collect_vec();
    let x_range = padded_range(&positions, Some(focal.interval()), &config.padding)?;

    let gene_bounds = input
        .genes
        .iter()
        .flat_map(|g| [g.start(), g.end()])
        .collect_vec();
    let nearby = padded_range(&gene_bounds, None, &config.padding.clone().with_radius(None))?;
    let allowed = AxisRange::new(nearby.min.min(x_range.min), nearby.max.max(x_range.max));

    let y_range = value_range(
        input.all_hits().map(QtlHit::neg_log10_p),
        &ValueRangeSpec::ASSOCIATION,
    );
    let scale = BetaScale::from_betas(input.all_hits().map(QtlHit::beta));

    let offsets = assign_jitter(
        &input.genes,
        x_range.span(),
        Some(input.gene.as_str()),
        &config.jitter,
        rng,
    )?;

    let others = input
        .genes
        .iter()
        .filter(|g| g.id() != input.gene)
        .collect_vec();
    let mut data: Vec<Box<dyn Trace>> = vec![
        nearby_genes_trace(&others, &offsets, "y"),
        focal_gene_trace(focal, "y"),
        label_trace(&[focal], &offsets, Font::new().color(BLACK), "y"),
    ];

    let domains = TrackDomains::uniform(input.cell_types.len() + 1, config.spacing)?;
    let mut extras = LayoutExtras::new();
    extras.set_pan_limits(allowed);
    let mut layout = base_layout()
        .margin(Margin::new().top(1).right(1))
        .grid(stacked_grid(domains.len()))
        .x_axis(genomic_axis(Some("Genomic Position"), x_range, config.show_grid));
    layout = extras.set_y_axis(layout, 1, gene_track_axis(domains.get(0)));
    let mut shapes = vec![band("y", -2.0, 2.0, Some(ShapeLayer::Below))];
    let mut annotations = Vec::with_capacity(input.cell_types.len());

    for (i, cell_type) in input.cell_types.iter().enumerate() {
        let axis_index = i + 2;
        let yref = yaxis_ref(axis_index);
        let domain = domains.get(i + 1);

        data.push(association_trace(cell_type, input.hits(cell_type), &scale, &yref));
        layout = extras.set_y_axis(
            layout,
            axis_index,
            value_axis(
                sized_title("\u{2212}log10(p)", 12),
                domain,
                y_range,
                config.show_grid,
            ),
        );
        shapes.push(band(&yref, -2.0, 2.0, None));
        if let Some(domain) = domain {
            annotations.push(track_label(cell_type, domain.end, 16));
        }
    }
    let layout = layout.shapes(shapes).annotations(annotations);

    info!(
        "Built gene view for {} with {} nearby genes and {} tracks",
        input.gene,
        others.len(),
        input.cell_types.len()
    );
    let mut figure = Figure::new(
        layout,
        extras,
        plot_config(&format!("BDP_png-{}", input.gene)),
    );
    figure.add_traces(data);
    Ok(figure)
}
