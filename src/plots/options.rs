use serde::{
    Deserialize,
    Serialize,
};

use crate::tools::{
    SignalRendering,
    TrackLayoutConfig,
};

/// User-adjustable display settings, as stored by the portal front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    pub track_height: Option<f64>,
    pub gap_height:   Option<f64>,
    pub show_grid:    Option<bool>,
    #[serde(rename = "useWebGL")]
    pub use_webgl:    Option<bool>,
}

impl DisplayOptions {
    /// Track layout with the configured heights; margins stay at their
    /// defaults.
    pub fn track_layout(&self) -> TrackLayoutConfig {
        let defaults = TrackLayoutConfig::default();
        TrackLayoutConfig {
            track_height: self.track_height.unwrap_or(defaults.track_height),
            gap_height: self.gap_height.unwrap_or(defaults.gap_height),
            ..defaults
        }
    }

    pub fn show_grid(&self) -> bool { self.show_grid.unwrap_or(true) }

    pub fn rendering(&self) -> SignalRendering {
        SignalRendering::from_webgl(self.use_webgl.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_end_keys() {
        let options: DisplayOptions = serde_json::from_str(
            r#"{"trackHeight": 80, "showGrid": false, "useWebGL": true, "dashedLineColor": "red"}"#,
        )
        .unwrap();
        let layout = options.track_layout();
        assert_eq!(layout.track_height, 80.0);
        assert_eq!(layout.gap_height, 10.0);
        assert!(!options.show_grid());
        assert_eq!(options.rendering(), SignalRendering::FullResolution);
    }

    #[test]
    fn test_defaults() {
        let options = DisplayOptions::default();
        assert!(options.show_grid());
        assert_eq!(options.rendering(), SignalRendering::Binned);
        assert_eq!(options.track_layout(), TrackLayoutConfig::default());
    }
}
