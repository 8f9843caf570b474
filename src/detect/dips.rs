//! Windowed dip scan and candidate consolidation.
//!
//! Given a cleaned light curve we:
//! - flag every interior sample that sits more than `2σ` below the mean of its
//!   local window (σ is the whole-series population standard deviation)
//! - collapse the flagged samples into at most one periodic candidate
//!
//! The per-index test is independent, so the scan runs on the rayon pool.
//! Collection is order-preserving, which keeps results bit-identical across
//! runs and thread counts.

use rayon::prelude::*;
use tracing::debug;

use crate::detect::stats::{mean, population_std};
use crate::domain::{Candidate, NumericSeries};

/// Smallest half-window, in samples.
pub const MIN_WINDOW: usize = 5;

/// The half-window grows as `n / WINDOW_DIVISOR` on long series.
pub const WINDOW_DIVISOR: usize = 50;

/// A sample is a dip when it sits this many σ below its local mean.
pub const DIP_SIGMA: f64 = 2.0;

/// Stand-in for σ on perfectly flat series, so the threshold never collapses
/// onto the local mean.
pub const FLAT_STD_EPSILON: f64 = 1e-6;

/// Reported depths never go below this.
pub const DEPTH_FLOOR: f64 = 1e-4;

/// Added to σ in the SNR denominator.
pub const SNR_EPSILON: f64 = 1e-6;

/// Transit duration as a fraction of the period.
pub const DURATION_FRACTION: f64 = 0.1;

/// Duration reported when the period is not positive.
pub const FALLBACK_DURATION: f64 = 0.05;

/// Period reported when the computed period is exactly zero.
pub const FALLBACK_PERIOD: f64 = 1.0;

/// Output of the dip scan.
#[derive(Debug, Clone, PartialEq)]
pub struct DipAnalysis {
    pub mean_flux: f64,
    pub std_flux: f64,
    /// Half-window used for the local mean.
    pub window: usize,
    /// Indices (into the series) of every flagged sample, ascending.
    pub dips: Vec<usize>,
    /// Zero or one candidate.
    pub candidates: Vec<Candidate>,
}

/// Scan a series for dips and consolidate them.
///
/// Never fails: the ingestor guarantees a non-trivial, equal-length series.
pub fn analyze_dips(series: &NumericSeries) -> DipAnalysis {
    let flux = series.flux();
    let mean_flux = mean(flux);
    let std_flux = population_std(flux, mean_flux);

    let window = window_size(flux.len());
    let dips = find_dips(flux, window, std_flux);
    let candidates: Vec<Candidate> =
        consolidate(series.time(), flux, &dips, mean_flux, std_flux).into_iter().collect();

    debug!(
        n = flux.len(),
        window,
        mean_flux,
        std_flux,
        dips = dips.len(),
        candidates = candidates.len(),
        "dip scan finished"
    );

    DipAnalysis {
        mean_flux,
        std_flux,
        window,
        dips,
        candidates,
    }
}

/// Half-window for a series of `n` samples: `max(5, n / 50)`.
pub fn window_size(n: usize) -> usize {
    (n / WINDOW_DIVISOR).max(MIN_WINDOW)
}

/// Indices `i ∈ [window, n - window)` where `flux[i]` falls below
/// `mean(flux[i - window .. i + window]) - 2σ`.
pub fn find_dips(flux: &[f64], window: usize, std_flux: f64) -> Vec<usize> {
    let end = flux.len().saturating_sub(window);
    if end <= window {
        return Vec::new();
    }

    let sigma = if std_flux != 0.0 { std_flux } else { FLAT_STD_EPSILON };
    let threshold_offset = DIP_SIGMA * sigma;

    (window..end)
        .into_par_iter()
        .filter(|&i| {
            let local = &flux[i - window..i + window];
            let mut local_mean = local.iter().sum::<f64>() / local.len() as f64;
            if !local_mean.is_finite() {
                local_mean = mean(local);
            }
            flux[i] < local_mean - threshold_offset
        })
        .collect()
}

/// Collapse flagged dips into at most one candidate.
///
/// Takes the first `2 * max(1, dips / 2)` dips; fewer than two of them is not
/// enough evidence and yields `None`.
// TODO: replace the group-size slicing with a real periodicity search (e.g. BLS)
// once callers no longer depend on these exact numbers.
pub fn consolidate(
    time: &[f64],
    flux: &[f64],
    dips: &[usize],
    mean_flux: f64,
    std_flux: f64,
) -> Option<Candidate> {
    if dips.is_empty() {
        return None;
    }

    let group_size = (dips.len() / 2).max(1);
    let slice = &dips[..(group_size * 2).min(dips.len())];
    if slice.len() < 2 {
        return None;
    }

    let first = *slice.first()?;
    let last = *slice.last()?;

    let epoch = time[first];
    let period = (time[last] - time[first]) / (slice.len() - 1).max(1) as f64;

    let min_flux = slice.iter().map(|&i| flux[i]).fold(f64::INFINITY, f64::min);
    let depth = (mean_flux - min_flux).max(DEPTH_FLOOR);
    let snr = depth / (std_flux + SNR_EPSILON);
    let duration = if period > 0.0 {
        period * DURATION_FRACTION
    } else {
        FALLBACK_DURATION
    };
    let period = if period == 0.0 { FALLBACK_PERIOD } else { period };

    Some(Candidate {
        epoch,
        period,
        depth,
        snr,
        duration,
    })
}
