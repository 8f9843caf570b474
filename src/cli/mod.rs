//! Command-line parsing for the light-curve dip scanner.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! ingest/detection code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Mission;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "transit", version, about = "Light-curve transit dip scanner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a light-curve CSV, scan it for dips, and print the results.
    Analyze(AnalyzeArgs),
    /// Write a synthetic light curve with injected transits as CSV.
    Sample(SampleArgs),
}

/// Options for `transit analyze`.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Light-curve CSV with a time column and a flux column.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Mission the light curve came from: kepler | k2 | tess, any case
    /// (echoed in the report only).
    #[arg(short = 'm', long, value_parser = str::parse::<Mission>, default_value_t = Mission::Kepler)]
    pub mission: Mission,

    /// Print the full report as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Render an ASCII plot of the light curve with dips marked.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the report JSON to this path.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Write the light curve (with a dip flag per sample) to this CSV path.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,
}

/// Options for `transit sample`.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 2000)]
    pub points: usize,

    /// Time step between samples (days).
    #[arg(long, default_value_t = 0.02)]
    pub cadence: f64,

    /// Time of the first transit.
    #[arg(long, default_value_t = 1.0)]
    pub epoch: f64,

    /// Time between transits.
    #[arg(long, default_value_t = 3.0)]
    pub period: f64,

    /// Length of each transit.
    #[arg(long, default_value_t = 0.12)]
    pub duration: f64,

    /// Fractional flux drop during transit.
    #[arg(long, default_value_t = 0.01)]
    pub depth: f64,

    /// White-noise standard deviation.
    #[arg(long, default_value_t = 0.0005)]
    pub noise: f64,

    /// Stellar variability amplitude.
    #[arg(long, default_value_t = 0.004)]
    pub variability: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["transit", "analyze", "lc.csv"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file, PathBuf::from("lc.csv"));
        assert_eq!(args.mission, Mission::Kepler);
        assert!(!args.json);
    }

    #[test]
    fn mission_flag_accepts_known_values_only() {
        let cli = Cli::try_parse_from(["transit", "analyze", "lc.csv", "--mission", "tess"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.mission, Mission::Tess);

        assert!(Cli::try_parse_from(["transit", "analyze", "lc.csv", "-m", "hubble"]).is_err());
    }

    #[test]
    fn mission_flag_ignores_case_and_surrounding_space() {
        for (raw, expected) in [("TESS", Mission::Tess), ("Kepler", Mission::Kepler), (" k2 ", Mission::K2)] {
            let cli = Cli::try_parse_from(["transit", "analyze", "lc.csv", "-m", raw]).unwrap();
            let Command::Analyze(args) = cli.command else {
                panic!("expected analyze");
            };
            assert_eq!(args.mission, expected, "{raw:?}");
        }
    }

    #[test]
    fn unknown_mission_reports_accepted_values() {
        let err = Cli::try_parse_from(["transit", "analyze", "lc.csv", "--mission", "Hubble"]).unwrap_err();
        assert!(
            err.to_string().contains("Unsupported mission. Use kepler | k2 | tess"),
            "{err}"
        );
    }

    #[test]
    fn sample_requires_output_path() {
        assert!(Cli::try_parse_from(["transit", "sample"]).is_err());
        assert!(Cli::try_parse_from(["transit", "sample", "-o", "x.csv", "--seed", "3"]).is_ok());
    }
}
