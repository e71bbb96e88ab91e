use anyhow::Context;
use bdp_tracks::prelude::*;
use clap::Args;
use log::info;

use crate::snapshot::{GeneSnapshot, RegionSnapshot, SnpSnapshot};
use crate::utils::{read_json, write_figure, OutputArgs, UtilsArgs};

#[derive(Args, Debug, Clone)]
pub(crate) struct RegionArgs {
    #[clap(flatten)]
    io: OutputArgs,

    #[arg(
        long,
        help = "Draw every signal sample as a WebGL step line instead of binned markers."
    )]
    webgl: bool,
}

impl RegionArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let snapshot: RegionSnapshot = read_json(&self.io.input)?;
        let input = snapshot
            .into_input()
            .context("Invalid region snapshot")?;

        let mut options = utils.display_options()?;
        if self.webgl {
            options.use_webgl = Some(true);
        }
        let config = RegionViewConfig::from_options(&options);
        info!("Rendering region {} ({:?})", input.region, config.rendering);

        let figure = build_region_view(&input, &config, &mut utils.rng())?;
        write_figure(&figure, &self.io)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GeneArgs {
    #[clap(flatten)]
    io: OutputArgs,

    #[arg(
        long,
        help = "Maximum distance of the visible range from the focal gene.",
        default_value_t = 1_000_000
    )]
    radius: PosType,
}

impl GeneArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let snapshot: GeneSnapshot = read_json(&self.io.input)?;
        let input = snapshot
            .into_input()
            .context("Invalid gene snapshot")?;

        let options = utils.display_options()?;
        let defaults = GeneViewConfig::default();
        let config = GeneViewConfig {
            padding: defaults.padding.clone().with_radius(Some(self.radius)),
            ..defaults
        }
        .with_show_grid(options.show_grid());

        let figure = build_gene_view(&input, &config, &mut utils.rng())?;
        write_figure(&figure, &self.io)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SnpArgs {
    #[clap(flatten)]
    io: OutputArgs,

    #[arg(
        long,
        help = "Maximum distance of the visible range from the focal SNP.",
        default_value_t = 1_100_000
    )]
    radius: PosType,

    #[arg(
        long,
        help = "SNPs closer than this to the focal SNP are drawn.",
        default_value_t = 2_000_000
    )]
    nearby_radius: PosType,
}

impl SnpArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let snapshot: SnpSnapshot = read_json(&self.io.input)?;
        let input = snapshot
            .into_input()
            .context("Invalid SNP snapshot")?;

        let defaults = SnpViewConfig::default();
        let config = SnpViewConfig {
            padding: defaults.padding.clone().with_radius(Some(self.radius)),
            ..defaults
        }
        .with_nearby_radius(self.nearby_radius);

        let figure = build_snp_view(&input, &config, &mut utils.rng())?;
        write_figure(&figure, &self.io)
    }
}
