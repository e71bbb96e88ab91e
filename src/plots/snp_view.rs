//! SNP-centric view: genes associated with the focal SNP, placed at their
//! signed association value, over the jittered SNPs around it.

use itertools::Itertools;
use log::info;
use plotly::common::{
    DashType,
    Title,
};
use plotly::layout::{
    Margin,
    ShapeLayer,
    TicksDirection,
};
use plotly::Trace;
use rand::Rng;

use super::color::BetaScale;
use super::gene_track::{
    association_gene_trace,
    snp_locations_trace,
};
use super::layout::{
    band,
    base_layout,
    free_value_axis,
    genomic_axis,
    hline,
    LayoutExtras,
};
use super::{
    plot_config,
    Figure,
};
use crate::data_structs::typedef::PosType;
use crate::data_structs::{
    Feature,
    Interval,
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
    ValueRangeSpec,
};
use crate::{
    with_field_fn,
    Result,
};

pub const SNP_VIEW_RADIUS: PosType = 1_100_000;
/// SNPs closer than this to the focal SNP are drawn.
pub const NEARBY_SNP_RADIUS: PosType = 2_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SnpViewInput {
    /// Identifier of the focal SNP; must be one of `snps`.
    pub snp:       String,
    pub cell_type: String,
    pub snps:      Vec<Feature>,
    /// Gene associations of the focal SNP in `cell_type`.
    pub genes:     Vec<QtlHit>,
}

impl SnpViewInput {
    pub fn new(
        snp: impl Into<String>,
        cell_type: impl Into<String>,
        snps: Vec<Feature>,
        genes: Vec<QtlHit>,
    ) -> Self {
        Self {
            snp: snp.into(),
            cell_type: cell_type.into(),
            snps,
            genes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnpViewConfig {
    pub padding:       PaddingConfig,
    pub nearby_radius: PosType,
    pub jitter:        JitterConfig,
}

impl SnpViewConfig {
    with_field_fn!(padding, PaddingConfig);
    with_field_fn!(nearby_radius, PosType);
    with_field_fn!(jitter, JitterConfig);
}

impl Default for SnpViewConfig {
    fn default() -> Self {
        Self {
            padding:       PaddingConfig::default().with_radius(Some(SNP_VIEW_RADIUS)),
            nearby_radius: NEARBY_SNP_RADIUS,
            jitter:        JitterConfig::around_focus(),
        }
    }
}

/// Builds the SNP-centric view.
///
/// Genes are drawn at `-log10(p) * sign(beta)` and coloured by effect size.
/// SNPs within `nearby_radius` of the focal SNP are jittered around the zero
/// line, the focal SNP itself stays at 0. Without associated genes the x
/// range is the radius window around the SNP.
pub fn build_snp_view<R: Rng + ?Sized>(
    input: &SnpViewInput,
    config: &SnpViewConfig,
    rng: &mut R,
) -> Result<Figure> {
    if config.nearby_radius < 0 {
        return Err(invalid_input!(
            "nearby SNP radius must not be negative, got {}",
            config.nearby_radius
        ));
    }
    let focal = input
        .snps
        .iter()
        .find(|s| s.id() == input.snp)
        .ok_or_else(|| invalid_input!("SNP {} is not among the SNP locations", input.snp))?;
    let position = focal.position();

    let (x_range, unclamped) = if input.genes.is_empty() {
        let radius = config.padding.radius.unwrap_or(config.nearby_radius);
        if radius <= 0 {
            return Err(invalid_input!(
                "SNP {} has no associated genes and no radius to frame it",
                input.snp
            ));
        }
        let frame = AxisRange::from(Interval::new(position - radius, position + radius));
        (frame, frame)
    }
    else {
        let positions = input
            .genes
            .iter()
            .flat_map(|h| [h.feature().start(), h.feature().end()])
            .chain([position])
            .collect_vec();
        (
            padded_range(&positions, Some(Interval::point(position)), &config.padding)?,
            padded_range(&positions, None, &config.padding.clone().with_radius(None))?,
        )
    };

    let window = Interval::new(position - config.nearby_radius, position + config.nearby_radius);
    let allowed = AxisRange::new(
        (window.start as f64).min(unclamped.min),
        (window.end as f64).max(unclamped.max),
    );

    let nearby = input
        .snps
        .iter()
        .filter(|s| window.contains(s.position()))
        .cloned()
        .collect_vec();
    let offsets = assign_jitter(
        &nearby,
        x_range.span(),
        Some(input.snp.as_str()),
        &config.jitter,
        rng,
    )?;

    let scale = BetaScale::from_betas(input.genes.iter().map(QtlHit::beta));
    let y_range = value_range(
        input.genes.iter().map(QtlHit::signed_neg_log10_p),
        &ValueRangeSpec::SIGNED_ASSOCIATION,
    );

    let mut data: Vec<Box<dyn Trace>> = Vec::with_capacity(input.genes.len() + 1);
    for hit in input.genes.iter() {
        data.push(association_gene_trace(hit, &scale, "y"));
    }
    data.push(snp_locations_trace(
        &nearby.iter().collect_vec(),
        &offsets,
        &input.snp,
        "y",
    ));

    let mut extras = LayoutExtras::new();
    extras.set_pan_limits(allowed);
    let layout = base_layout()
        .title(Title::with_text(&format!(
            "Genes around {} ({})",
            input.snp, input.cell_type
        )))
        .plot_background_color("white")
        .paper_background_color("#f5f5f5")
        .margin(Margin::new().top(30).bottom(30).right(5))
        .x_axis(genomic_axis(None, x_range, false).ticks(TicksDirection::Outside))
        .shapes(vec![
            hline("y", -2.0, None),
            hline("y", 2.0, None),
            band("y", -2.0, 2.0, Some(ShapeLayer::Below)),
            hline("y", 0.0, Some(DashType::Dash)),
        ]);
    let layout = extras.set_y_axis(
        layout,
        1,
        free_value_axis(Title::with_text("\u{2212}log10(p)"), y_range),
    );

    info!(
        "Built SNP view for {} with {} genes and {} nearby SNPs",
        input.snp,
        input.genes.len(),
        nearby.len()
    );
    let mut figure = Figure::new(
        layout,
        extras,
        plot_config(&format!("BDP_png-{}-{}", input.snp, input.cell_type)),
    );
    figure.add_traces(data);
    Ok(figure)
}
