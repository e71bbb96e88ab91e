//! Plotly figures of the three region views.
//!
//! Traces, layouts and renderer settings are built with the `plotly` crate
//! and assembled by [`build_region_view`], [`build_gene_view`] and
//! [`build_snp_view`] into a [`Figure`].

pub mod color;
pub mod format;
pub mod gene_track;
mod gene_view;
pub mod layout;
mod options;
mod region_view;
mod selection;
mod snp_view;
pub mod trace;

pub use gene_view::{
    build_gene_view,
    GeneViewConfig,
    GeneViewInput,
};
pub use layout::LayoutExtras;
pub use options::DisplayOptions;
use plotly::configuration::{
    DoubleClick,
    ImageButtonFormats,
    ModeBarButtonName,
    ToImageButtonOptions,
};
use plotly::layout::Layout;
use plotly::{
    Configuration,
    Plot,
    Trace,
};
pub use region_view::{
    build_region_view,
    RegionViewConfig,
    RegionViewInput,
};
pub use selection::{
    SelectedPoint,
    SelectionDetails,
    SelectionIndex,
};
pub use snp_view::{
    build_snp_view,
    SnpViewConfig,
    SnpViewInput,
};
use serde_json::Value;

use crate::Result;

/// plotly.js build with `minallowed` / `maxallowed` axis support.
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PLOT_DIV: &str = "bdp-plot";

/// Renderer settings shared by all views; exported images are named
/// `filename`.
pub fn plot_config(filename: &str) -> Configuration {
    Configuration::new()
        .double_click(DoubleClick::Reset)
        .responsive(true)
        .display_logo(false)
        .scroll_zoom(true)
        .to_image_button_options(
            ToImageButtonOptions::new()
                .format(ImageButtonFormats::Png)
                .filename(filename)
                .scale(1),
        )
        .mode_bar_buttons_to_remove(vec![ModeBarButtonName::AutoScale2d])
}

/// A [`Plot`] together with the layout keys it cannot hold.
pub struct Figure {
    plot:        Plot,
    extras:      LayoutExtras,
    trace_count: usize,
}

impl Figure {
    pub fn new(
        layout: Layout,
        extras: LayoutExtras,
        config: Configuration,
    ) -> Self {
        let mut plot = Plot::new();
        plot.set_layout(layout);
        plot.set_configuration(config);
        Self {
            plot,
            extras,
            trace_count: 0,
        }
    }

    pub fn add_trace(
        &mut self,
        trace: Box<dyn Trace>,
    ) {
        self.plot.add_trace(trace);
        self.trace_count += 1;
    }

    pub fn add_traces(
        &mut self,
        traces: Vec<Box<dyn Trace>>,
    ) {
        self.trace_count += traces.len();
        self.plot.add_traces(traces);
    }

    pub fn plot(&self) -> &Plot { &self.plot }

    pub fn extras(&self) -> &LayoutExtras { &self.extras }

    pub fn trace_count(&self) -> usize { self.trace_count }

    /// Figure JSON (`data`, `layout`, `config`) with the extras merged into
    /// the layout.
    pub fn to_value(&self) -> Result<Value> {
        let mut value: Value = serde_json::from_str(&self.plot.to_json())?;
        if !self.extras.is_empty() {
            self.extras.apply(&mut value["layout"])?;
        }
        Ok(value)
    }

    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(&self.to_value()?)?) }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }

    /// Standalone HTML page. The plot itself is the inline HTML `plotly`
    /// renders; the extras are applied with `Plotly.relayout`.
    pub fn to_html(&self) -> Result<String> {
        let plot = self.plot.to_inline_html(Some(PLOT_DIV));
        let relayout = if self.extras.is_empty() {
            String::new()
        }
        else {
            format!(
                "<script>Plotly.relayout(\"{}\", {});</script>\n",
                PLOT_DIV,
                Value::Object(self.extras.relayout_update()?)
            )
        };
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<script src="{cdn}"></script>
</head>
<body>
{plot}
{relayout}</body>
</html>
"#,
            cdn = PLOTLY_CDN,
        ))
    }

    /// Serialized traces drawn on the y axis `yref` (`y`, `y2`, ...).
    pub fn traces_on(
        &self,
        yref: &str,
    ) -> Result<Vec<Value>> {
        let value = self.to_value()?;
        Ok(value["data"]
            .as_array()
            .into_iter()
            .flatten()
            .filter(|t| t["yaxis"] == yref)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use plotly::common::Mode;

    use super::layout::base_layout;
    use super::trace::{
        defined,
        scatter,
    };
    use super::*;
    use crate::tools::AxisRange;

    #[test]
    fn test_config_keys() {
        let value = serde_json::to_value(plot_config("plot")).unwrap();
        assert_eq!(value["doubleClick"], "reset");
        assert_eq!(value["displaylogo"], false);
        assert_eq!(value["toImageButtonOptions"]["filename"], "plot");
        assert_eq!(value["toImageButtonOptions"]["format"], "png");
    }

    fn figure() -> Figure {
        let mut extras = LayoutExtras::new();
        extras.set_pan_limits(AxisRange::new(0.0, 10.0));
        let mut figure = Figure::new(base_layout(), extras, plot_config("plot"));
        figure.add_trace(scatter(defined([1.0]), defined([2.0]), Mode::Markers, "y"));
        let traces: Vec<Box<dyn Trace>> = vec![
            scatter(defined([1.0]), defined([3.0]), Mode::Markers, "y2"),
            scatter(defined([2.0]), defined([4.0]), Mode::Markers, "y2"),
        ];
        figure.add_traces(traces);
        figure
    }

    #[test]
    fn test_figure_json_merges_extras() {
        let figure = figure();
        assert_eq!(figure.trace_count(), 3);
        let value = figure.to_value().unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
        assert_eq!(value["layout"]["dragmode"], "pan");
        assert_eq!(value["layout"]["xaxis"]["maxallowed"], 10.0);
        assert_eq!(figure.traces_on("y2").unwrap().len(), 2);
        assert!(figure.traces_on("y5").unwrap().is_empty());

        let parsed: Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_html_embeds_figure() {
        let html = figure().to_html().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains(PLOT_DIV));
        assert!(html.contains("\"dragmode\":\"pan\""));
        assert!(html.contains("Plotly.relayout(\"bdp-plot\", {"));
        assert!(html.contains("\"xaxis.maxallowed\":10.0"));
    }
}
