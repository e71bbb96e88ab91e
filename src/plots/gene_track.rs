//! Gene and SNP glyph traces.
//!
//! Genes are drawn as horizontal segments in strand direction with a
//! triangle marker at the 3' end. Non-focal genes share one polyline trace
//! whose segments are separated by `null` points; the focal gene gets its
//! own bold trace and a label.

use itertools::Itertools;
use plotly::common::{
    Font,
    HoverInfo,
    Line,
    Marker,
    MarkerSymbol,
    Mode,
    Position,
};

use super::color::{
    BetaScale,
    BLACK,
    GREY,
};
use super::format::{
    feature_hover,
    gene_association_hover,
    snp_location_hover,
};
use super::trace::{
    clickable,
    defined,
    scatter,
    XyTrace,
};
use crate::data_structs::{
    Feature,
    PointType,
    QtlHit,
    Strand,
};
use crate::tools::JitterAssignment;

/// Distance between a glyph and its label.
pub const LABEL_OFFSET: f64 = 0.2;

fn segment(feature: &Feature) -> (f64, f64) {
    let (x0, x1) = feature.glyph_ends();
    (x0 as f64, x1 as f64)
}

/// Arrow drawn at the 3' end of a gene glyph.
pub fn arrow(strand: Strand) -> MarkerSymbol {
    match strand {
        Strand::Reverse => MarkerSymbol::TriangleLeft,
        _ => MarkerSymbol::TriangleRight,
    }
}

/// Two values per gene segment followed by `gap`.
fn per_segment<T, F>(
    genes: &[&Feature],
    gap: T,
    f: F,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&Feature) -> [T; 2], {
    genes
        .iter()
        .flat_map(|g| {
            let [start, end] = f(g);
            [start, end, gap.clone()]
        })
        .collect()
}

/// One polyline with a `null` gap after every gene.
pub fn nearby_genes_trace(
    genes: &[&Feature],
    offsets: &JitterAssignment,
    yaxis: &str,
) -> Box<XyTrace> {
    let x = per_segment(genes, None, |g| {
        let (x0, x1) = segment(g);
        [Some(x0), Some(x1)]
    });
    let y = per_segment(genes, None, |g| {
        let offset = offsets.offset_or_zero(g.id());
        [Some(offset), Some(offset)]
    });
    let marker = Marker::new()
        .symbol_array(per_segment(genes, MarkerSymbol::Circle, |g| {
            [MarkerSymbol::Circle, arrow(g.strand())]
        }))
        .size_array(per_segment(genes, 0, |_| [0, 8]))
        .opacity_array(per_segment(genes, 0.0, |_| [0.0, 1.0]))
        .color(GREY);

    let trace = scatter(x, y, Mode::LinesMarkers, yaxis)
        .name("Nearby Genes")
        .line(Line::new().color(GREY).width(2.0))
        .marker(marker)
        .hover_info(HoverInfo::Text)
        .hover_text_array(per_segment(genes, String::new(), |g| {
            let text = feature_hover(g);
            [text.clone(), text]
        }))
        .show_legend(false);
    clickable(
        trace,
        PointType::Gene,
        per_segment(genes, String::new(), |g| {
            [g.id().to_string(), g.id().to_string()]
        }),
    )
}

/// Bold black glyph of the focal gene at offset 0.
pub fn focal_gene_trace(
    gene: &Feature,
    yaxis: &str,
) -> Box<XyTrace> {
    glyph_trace(gene, 0.0, BLACK, feature_hover(gene), yaxis).name(gene.id())
}

/// Gene glyph at its signed association value, coloured by effect size.
pub fn association_gene_trace(
    hit: &QtlHit,
    scale: &BetaScale,
    yaxis: &str,
) -> Box<XyTrace> {
    let gene = hit.feature();
    let y = hit.signed_neg_log10_p();
    let color = scale.color(hit.beta(), y);
    glyph_trace(gene, y, &color, gene_association_hover(hit), yaxis).name(gene.id())
}

fn glyph_trace(
    gene: &Feature,
    y: f64,
    color: &str,
    hover: String,
    yaxis: &str,
) -> Box<XyTrace> {
    let (x0, x1) = segment(gene);
    let marker = Marker::new()
        .symbol_array(vec![MarkerSymbol::Circle, arrow(gene.strand())])
        .size_array(vec![0, 12])
        .opacity_array(vec![0.0, 1.0])
        .color(color.to_string());

    let trace = scatter(defined([x0, x1]), defined([y, y]), Mode::LinesMarkers, yaxis)
        .line(Line::new().color(color.to_string()).width(3.0))
        .marker(marker)
        .hover_info(HoverInfo::Text)
        .hover_text_array(vec![hover.clone(), hover])
        .show_legend(false);
    clickable(
        trace,
        PointType::Gene,
        vec![gene.id().to_string(), gene.id().to_string()],
    )
}

/// Text labels centred under each glyph.
pub fn label_trace(
    genes: &[&Feature],
    offsets: &JitterAssignment,
    font: Font,
    yaxis: &str,
) -> Box<XyTrace> {
    let (x, y): (Vec<f64>, Vec<f64>) = genes
        .iter()
        .map(|g| (g.midpoint(), offsets.offset_or_zero(g.id()) - LABEL_OFFSET))
        .unzip();
    scatter(defined(x), defined(y), Mode::Text, yaxis)
        .text_array(genes.iter().map(|g| g.id().to_string()).collect_vec())
        .text_position(Position::BottomCenter)
        .text_font(font)
        .hover_info(HoverInfo::Skip)
        .show_legend(false)
}

/// SNP location markers; the focal SNP is black, larger and labelled.
pub fn snp_locations_trace(
    snps: &[&Feature],
    offsets: &JitterAssignment,
    focal: &str,
    yaxis: &str,
) -> Box<XyTrace> {
    let focal_flags = snps.iter().map(|s| s.id() == focal).collect_vec();
    let marker = Marker::new()
        .color_array(
            focal_flags
                .iter()
                .map(|f| if *f { BLACK } else { GREY })
                .collect_vec(),
        )
        .size_array(
            focal_flags
                .iter()
                .map(|f| if *f { 12 } else { 8 })
                .collect_vec(),
        )
        .opacity(1.0)
        .line(Line::new().width(0.2));

    let trace = scatter(
        defined(snps.iter().map(|s| s.position() as f64)),
        defined(snps.iter().map(|s| offsets.offset_or_zero(s.id()))),
        Mode::MarkersText,
        yaxis,
    )
    .name("SNPs")
    .marker(marker)
    .text_array(
        snps.iter()
            .zip(focal_flags.iter())
            .map(|(s, f)| if *f { s.id().to_string() } else { String::new() })
            .collect_vec(),
    )
    .text_position(Position::TopCenter)
    .hover_info(HoverInfo::Text)
    .hover_text_array(snps.iter().map(|s| snp_location_hover(s)).collect_vec())
    .show_legend(false);
    clickable(
        trace,
        PointType::Snp,
        snps.iter().map(|s| s.id().to_string()).collect(),
    )
}
