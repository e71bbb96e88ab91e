mod parse_region;
mod snapshot;
mod utils;
mod views;

use clap::{Parser, Subcommand};
use console::style;
use parse_region::ParseRegionArgs;
use utils::UtilsArgs;
use views::{GeneArgs, RegionArgs, SnpArgs};
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Genomic region view: gene track and one signal track per cell type.
    Region {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  RegionArgs,
    },

    /// Gene-centric view: nearby genes and SNP associations per cell type.
    Gene {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  GeneArgs,
    },

    /// SNP-centric view: associated genes and the SNPs around the focal one.
    Snp {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  SnpArgs,
    },

    /// Normalises a region string and prints its fetch window.
    #[command(name = "parse-region")]
    ParseRegion {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ParseRegionArgs,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        MainMenu::Region { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Gene { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Snp { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::ParseRegion { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
    }
    Ok(())
}

fn main() {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    const REGION_SNAPSHOT: &str = r#"{
        "dataset": "demo",
        "region": "chr1:10,000-20,000",
        "genes": [
            {"gene_id": "G1", "position_start": 11000, "position_end": 13000, "strand": "+"},
            {"gene_id": "G2", "position_start": 12000, "position_end": 15000, "strand": "-"}
        ],
        "signal": {
            "Astro": [{"position": 10000, "value": 1.0}, {"position": 10050, "value": 3.0}],
            "Micro": [{"position": 10000, "value": 0.5}]
        }
    }"#;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bdp").chain(args.iter().copied())).unwrap()
    }

    fn run_without_logger(cli: Cli) -> anyhow::Result<()> {
        match cli.command {
            MainMenu::Region { utils, args } => args.run(&utils),
            MainMenu::Gene { utils, args } => args.run(&utils),
            MainMenu::Snp { utils, args } => args.run(&utils),
            MainMenu::ParseRegion { args, .. } => args.run(),
        }
    }

    fn write_snapshot(
        dir: &Path,
        text: &str,
    ) -> String {
        let path = dir.join("input.json");
        fs::write(&path, text).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_region_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(dir.path(), REGION_SNAPSHOT);
        let output = dir.path().join("figure.json");
        let cli = parse(&[
            "region",
            &input,
            "-o",
            output.to_str().unwrap(),
            "--seed",
            "7",
        ]);
        run_without_logger(cli).unwrap();

        let figure: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        // gene polyline, gene labels, two signal tracks
        assert_eq!(figure["data"].as_array().unwrap().len(), 4);
        assert_eq!(figure["layout"]["title"]["text"], "<b>chr1:10000-20000</b>");
        assert_eq!(
            figure["config"]["toImageButtonOptions"]["filename"],
            "demo.chr1.10000-20000"
        );
    }

    #[test]
    fn test_region_is_reproducible_with_seed() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(dir.path(), REGION_SNAPSHOT);
        let outputs = ["a.json", "b.json"].map(|name| {
            let output = dir.path().join(name);
            let cli = parse(&["region", &input, "-o", output.to_str().unwrap(), "--seed", "3"]);
            run_without_logger(cli).unwrap();
            fs::read_to_string(output).unwrap()
        });
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_region_to_html_with_webgl() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(dir.path(), REGION_SNAPSHOT);
        let output = dir.path().join("figure.html");
        let cli = parse(&[
            "region",
            &input,
            "-o",
            output.to_str().unwrap(),
            "-f",
            "html",
            "--webgl",
        ]);
        run_without_logger(cli).unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("\"type\":\"scattergl\""));
    }

    #[test]
    fn test_gene_view_missing_focal_gene() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(
            dir.path(),
            r#"{"gene": "NOPE", "genes": [{"gene_id": "G1", "position_start": 1, "position_end": 5}]}"#,
        );
        let cli = parse(&["gene", &input, "--seed", "1"]);
        assert!(run_without_logger(cli).is_err());
    }

    #[test]
    fn test_snp_view() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(
            dir.path(),
            r#"{
                "snp": "rs1",
                "cell_type": "Astro",
                "snps": [{"snp_id": "rs1", "position": 1000000}, {"snp_id": "rs2", "position": 1000500}],
                "genes": [{"gene_id": "G1", "p_value": 1e-4, "beta_value": 0.3,
                           "position_start": 990000, "position_end": 995000, "strand": "+"}]
            }"#,
        );
        let output = dir.path().join("snp.json");
        let cli = parse(&["snp", &input, "-o", output.to_str().unwrap(), "--seed", "2"]);
        run_without_logger(cli).unwrap();

        let figure: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(figure["layout"]["title"]["text"], "Genes around rs1 (Astro)");
    }

    #[test]
    fn test_parse_region_arguments() {
        let cli = parse(&["parse-region", "chr1", "1000", "2000", "-vv"]);
        match cli.command {
            MainMenu::ParseRegion { utils, args } => {
                assert_eq!(utils.verbose, 2);
                assert!(args.run().is_ok());
            },
            _ => panic!("expected parse-region"),
        }
        let cli = parse(&["parse-region", "chr1:2000-1000"]);
        assert!(run_without_logger(cli).is_err());
    }
}
