//! Number and hover-text formatting.

use crate::data_structs::{
    Feature,
    FeatureKind,
    QtlHit,
};

pub const MINUS_SIGN: char = '\u{2212}';

/// Rounds `value` to `precision` significant digits.
pub fn round_sig(
    value: f64,
    precision: usize,
) -> f64 {
    if !value.is_finite() || value == 0.0 || precision == 0 {
        return value;
    }
    format!("{:.*e}", precision - 1, value)
        .parse()
        .unwrap_or(value)
}

/// `value` rounded to `precision` significant digits, with a typographic
/// minus sign. Non-finite values format as an empty string.
pub fn format_number(
    value: f64,
    precision: usize,
) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = round_sig(value, precision);
    let text = rounded.to_string();
    if rounded < 0.0 {
        text.replacen('-', &MINUS_SIGN.to_string(), 1)
    }
    else {
        text
    }
}

/// Hover text of a gene or peak glyph.
pub fn feature_hover(feature: &Feature) -> String {
    let kind = match feature.kind() {
        FeatureKind::Peak => "Peak",
        _ => "Gene",
    };
    format!(
        "<b>{}:</b> {}<br><b>Start:</b> {}<br><b>End:</b> {}<br><b>Strand:</b> {}",
        kind,
        feature.id(),
        feature.start(),
        feature.end(),
        feature.strand().label()
    )
}

/// Hover text of a gene glyph carrying an association.
pub fn gene_association_hover(hit: &QtlHit) -> String {
    format!(
        "{}<br><b>\u{3b2}:</b> {}<br>{}<b>log10(p):</b> {}",
        feature_hover(hit.feature()),
        format_number(hit.beta(), 3),
        MINUS_SIGN,
        format_number(hit.neg_log10_p(), 3)
    )
}

/// Hover text of a SNP association marker.
pub fn snp_association_hover(hit: &QtlHit) -> String {
    format!(
        "<b>SNP:</b> {}<br><b>Position:</b> {}<br><b>\u{3b2}:</b> {}<br>{}<b>log10(p):</b> {}",
        hit.id(),
        hit.feature().position(),
        format_number(hit.beta(), 3),
        MINUS_SIGN,
        format_number(hit.neg_log10_p(), 3)
    )
}

/// Hover text of a SNP location marker.
pub fn snp_location_hover(snp: &Feature) -> String {
    format!(
        "<b>SNP ID:</b> {}<br><b>Position:</b> {}<br>",
        snp.id(),
        snp.position()
    )
}

/// Hover template of a signal track.
pub fn signal_hovertemplate(cell_type: &str) -> String {
    format!(
        "<b>{}</b><br>Position: %{{x}}<br>Value: %{{y:.3f}}<br><extra></extra>",
        cell_type
    )
}
