use anyhow::Context;
use bdp_tracks::prelude::*;
use clap::Args;
use console::style;
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub(crate) struct ParseRegionArgs {
    #[arg(
        required = true,
        num_args = 1..,
        help = "Region, e.g. chr1:1,000-2,000, 1:1000-2000 or \"chr1 1000 2000\"."
    )]
    region: Vec<String>,

    #[arg(long, help = "Print the result as JSON.")]
    json: bool,
}

impl ParseRegionArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let raw = self.region.join(" ");
        let region: Region = raw
            .parse()
            .with_context(|| format!("Invalid region {}", style(&raw).red()))?;
        let window = region.fetch_window();

        if self.json {
            let value = json!({
                "region": region,
                "fetchWindow": window,
                "backendBinSize": region.backend_bin_size(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        else {
            println!("Region:           {}", style(&region).green());
            println!("Fetch window:     {}", style(&window).blue());
            println!(
                "Backend bin size: {}",
                style(region.backend_bin_size()).blue()
            );
        }
        Ok(())
    }
}
