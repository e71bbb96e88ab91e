use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bdp_tracks::plots::{DisplayOptions, Figure};
use clap::{ArgAction, Args, ValueEnum};
use console::style;
use log::{debug, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace)."
    )]
    pub verbose: u8,

    #[arg(
        long,
        help = "Seed of the jitter random source. Fresh entropy is used when omitted."
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "options",
        help = "JSON file with display options (trackHeight, gapHeight, showGrid, useWebGL)."
    )]
    pub options: Option<PathBuf>,
}

impl UtilsArgs {
    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Initialises logging. `RUST_LOG` directives override the `-v` level.
    pub fn setup(&self) -> anyhow::Result<()> {
        let mut builder = pretty_env_logger::formatted_builder();
        builder.filter_level(self.level());
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        builder
            .try_init()
            .context("Failed to set up logger")?;
        debug!("Logger initialised at level {}", self.level());
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn display_options(&self) -> anyhow::Result<DisplayOptions> {
        match self.options.as_ref() {
            Some(path) => {
                let options: DisplayOptions = read_json(path)?;
                info!("Loaded display options from {}", path.display());
                Ok(options)
            },
            None => Ok(DisplayOptions::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Plotly figure JSON (`data`, `layout`, `config`).
    Json,
    /// Standalone page loading plotly.js.
    Html,
}

/// Input snapshot and figure destination.
#[derive(Args, Debug, Clone)]
pub(crate) struct OutputArgs {
    #[arg(required = true, help = "Path of the JSON input snapshot.")]
    pub input: PathBuf,

    #[arg(
        short,
        long,
        help = "Path for the generated figure. Printed to stdout when omitted."
    )]
    pub output: Option<PathBuf>,

    #[clap(short, long, value_enum, default_value_t = OutputFormat::Json, help = "Figure format.")]
    pub format: OutputFormat,

    #[arg(long, help = "Pretty-print JSON output.")]
    pub pretty: bool,
}

pub(crate) fn validate_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        bail!("Path {} does not exist.", style(path.display()).red());
    }
    if !path.is_file() {
        bail!("Path {} is not a file.", style(path.display()).red());
    }
    Ok(())
}

pub(crate) fn validate_output(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            bail!(
                "Output directory {} does not exist.",
                style(parent.display()).red()
            );
        }
    }
    if path.is_dir() {
        bail!("Output path {} is a directory.", style(path.display()).red());
    }
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    validate_input(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub(crate) fn render_figure(
    figure: &Figure,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json if pretty => figure.to_json_pretty()?,
        OutputFormat::Json => figure.to_json()?,
        OutputFormat::Html => figure.to_html()?,
    };
    Ok(text)
}

pub(crate) fn write_figure(
    figure: &Figure,
    args: &OutputArgs,
) -> anyhow::Result<()> {
    let text = render_figure(figure, args.format, args.pretty)?;
    match args.output.as_ref() {
        Some(path) => {
            validate_output(path)?;
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Figure with {} traces written to {}",
                style(figure.trace_count()).green(),
                style(path.display()).green()
            );
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn utils(seed: Option<u64>) -> UtilsArgs {
        UtilsArgs {
            verbose: 0,
            seed,
            options: None,
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a: u64 = utils(Some(5)).rng().gen();
        let b: u64 = utils(Some(5)).rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"trackHeight": 70, "useWebGL": true}"#).unwrap();
        let args = UtilsArgs {
            options: Some(path),
            ..utils(None)
        };
        let options = args.display_options().unwrap();
        assert_eq!(options.track_height, Some(70.0));
        assert_eq!(options.use_webgl, Some(true));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_input(&dir.path().join("missing.json")).is_err());
        assert!(validate_input(dir.path()).is_err());
        assert!(validate_output(&dir.path().join("nested/out.json")).is_err());
        assert!(validate_output(&dir.path().join("out.json")).is_ok());
    }
}
