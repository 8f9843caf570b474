//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the transit model from configuration
//! - reads the upload and runs the analysis pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{AnalyzeArgs, Command, SampleArgs};
use crate::data::{SampleConfig, generate_light_curve};
use crate::error::AppError;
use crate::models::{ModelConfig, TransitModel};

pub mod pipeline;

/// Entry point for the `transit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let model = TransitModel::new(ModelConfig::from_env());
    let upload = pipeline::read_upload(&args.file)?;
    let run = pipeline::run_analysis(upload, args.mission, &model)?;

    if args.json {
        let json = serde_json::to_string_pretty(&run.report).map_err(AppError::internal)?;
        println!("{json}");
    } else {
        println!(
            "{}",
            crate::report::format_run_summary(&run.report, &run.ingest, &run.inference.scan)
        );
    }

    if args.plot {
        let plot = crate::plot::render_light_curve(
            &run.report.light_curve,
            &run.inference.scan.dips,
            args.width,
            args.height,
        );
        // Keep stdout pure JSON when --json is set.
        if args.json {
            eprintln!("{plot}");
        } else {
            println!("{plot}");
        }
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        crate::io::export::write_report_json(path, &run.report)?;
    }
    if let Some(path) = &args.export_csv {
        crate::io::export::write_light_curve_csv(path, &run.report.light_curve, &run.inference.scan.dips)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let curve = generate_light_curve(&config)?;
    let bytes = curve.to_csv_bytes()?;

    std::fs::write(&args.out, bytes)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", args.out.display())))?;

    let transit_samples = curve.in_transit.iter().filter(|&&b| b).count();
    info!(path = %args.out.display(), points = config.points, transit_samples, "wrote synthetic light curve");
    println!(
        "Wrote {} samples ({} in transit) to {}",
        config.points,
        transit_samples,
        args.out.display()
    );
    Ok(())
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        points: args.points,
        cadence: args.cadence,
        epoch: args.epoch,
        period: args.period,
        duration: args.duration,
        depth: args.depth,
        noise: args.noise,
        variability: args.variability,
        seed: args.seed,
    }
}
