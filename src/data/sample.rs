//! Synthetic light-curve generation.
//!
//! Produces a normalized flux series around `1.0` with:
//! - slow quasi-sinusoidal stellar variability
//! - white Gaussian noise
//! - box-shaped transits of fixed depth, period and duration
//!
//! Generation is fully deterministic for a given config (seeded `StdRng`).

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::AppError;

/// Parameters for [`generate_light_curve`].
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of samples.
    pub points: usize,
    /// Time step between samples (days).
    pub cadence: f64,
    /// Time of the first transit.
    pub epoch: f64,
    /// Time between transits.
    pub period: f64,
    /// Length of each transit.
    pub duration: f64,
    /// Fractional flux drop during transit.
    pub depth: f64,
    /// Standard deviation of the white noise.
    pub noise: f64,
    /// Amplitude of the stellar variability term.
    pub variability: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            points: 2000,
            cadence: 0.02,
            epoch: 1.0,
            period: 3.0,
            duration: 0.12,
            depth: 0.01,
            noise: 0.0005,
            variability: 0.004,
            seed: 42,
        }
    }
}

/// A generated light curve plus the ground-truth transit mask.
#[derive(Debug, Clone)]
pub struct SyntheticCurve {
    pub time: Vec<f64>,
    pub flux: Vec<f64>,
    /// `true` where a transit was injected.
    pub in_transit: Vec<bool>,
}

impl SyntheticCurve {
    /// Render as a `time,flux` CSV document.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, AppError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["time", "flux"])
            .map_err(|e| AppError::new(2, format!("Failed to write sample CSV header: {e}")))?;
        for (t, f) in self.time.iter().zip(&self.flux) {
            writer
                .write_record([t.to_string(), f.to_string()])
                .map_err(|e| AppError::new(2, format!("Failed to write sample CSV row: {e}")))?;
        }
        writer
            .into_inner()
            .map_err(|e| AppError::new(2, format!("Failed to finish sample CSV: {e}")))
    }
}

pub fn generate_light_curve(config: &SampleConfig) -> Result<SyntheticCurve, AppError> {
    if config.points == 0 {
        return Err(AppError::new(2, "Sample point count must be > 0."));
    }
    if !(config.cadence.is_finite() && config.cadence > 0.0) {
        return Err(AppError::new(2, "Cadence must be finite and > 0."));
    }
    if !(config.period.is_finite() && config.period > 0.0) {
        return Err(AppError::new(2, "Transit period must be finite and > 0."));
    }
    if !(config.duration.is_finite() && config.duration >= 0.0 && config.duration < config.period) {
        return Err(AppError::new(2, "Transit duration must be in [0, period)."));
    }
    if !(config.depth.is_finite() && (0.0..1.0).contains(&config.depth)) {
        return Err(AppError::new(2, "Transit depth must be in [0, 1)."));
    }
    if !(config.epoch.is_finite() && config.variability.is_finite() && config.variability >= 0.0) {
        return Err(AppError::new(2, "Invalid epoch or variability settings."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise level must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(2, format!("Invalid noise level {}: {e}", config.noise)))?;

    let mut time = Vec::with_capacity(config.points);
    let mut flux = Vec::with_capacity(config.points);
    let mut in_transit = Vec::with_capacity(config.points);

    for i in 0..config.points {
        let t = i as f64 * config.cadence;
        let transit = is_in_transit(t, config.epoch, config.period, config.duration);

        let mut f = 1.0 - (i as f64 * 0.07).sin() * config.variability;
        if transit {
            f -= config.depth;
        }
        f += normal.sample(&mut rng);

        time.push(t);
        flux.push(f);
        in_transit.push(transit);
    }

    Ok(SyntheticCurve {
        time,
        flux,
        in_transit,
    })
}

fn is_in_transit(t: f64, epoch: f64, period: f64, duration: f64) -> bool {
    t >= epoch && (t - epoch).rem_euclid(period) < duration
}
