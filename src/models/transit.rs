//! `TransitModel`: configuration + the analysis entry point.
//!
//! Built once at startup and shared by reference. It holds no mutable state,
//! so concurrent requests can use the same instance without synchronization.

use tracing::info;

use crate::detect::{DipAnalysis, analyze_dips};
use crate::domain::{AnalysisResult, NumericSeries};
use crate::report::assemble;

/// Version label reported when nothing else is configured.
pub const DEFAULT_MODEL_VERSION: &str = "0.1-mock";

/// Environment variable that overrides the version label.
pub const MODEL_VERSION_ENV: &str = "TRANSIT_MODEL_VERSION";

/// Static configuration for [`TransitModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub model_version: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}

impl ModelConfig {
    /// Load from the environment (and `.env` if present).
    ///
    /// A missing or blank `TRANSIT_MODEL_VERSION` falls back to the default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_version(std::env::var(MODEL_VERSION_ENV).ok())
    }

    fn from_version(version: Option<String>) -> Self {
        match version.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => Self { model_version: v },
            _ => Self::default(),
        }
    }
}

/// Windowed-outlier transit detector.
///
/// The scan is a crude heuristic (see [`crate::detect`]); `model_version` only
/// labels the output.
#[derive(Debug, Clone)]
pub struct TransitModel {
    config: ModelConfig,
}

/// Everything a single analysis produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub result: AnalysisResult,
    /// Scan diagnostics (flagged dips, window). Not part of the result value.
    pub scan: DipAnalysis,
}

impl TransitModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn version(&self) -> &str {
        &self.config.model_version
    }

    /// Scan the series and assemble the result.
    pub fn infer(&self, series: &NumericSeries) -> Inference {
        let scan = analyze_dips(series);
        let result = assemble(series, &scan, self.version());
        info!(
            n_points = result.summary.n_points,
            candidates = result.candidates.len(),
            model_version = self.version(),
            "analysis complete"
        );
        Inference { result, scan }
    }

    /// Convenience wrapper returning only the result value.
    pub fn analyze(&self, series: &NumericSeries) -> AnalysisResult {
        self.infer(series).result
    }
}

impl Default for TransitModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> NumericSeries {
        let time: Vec<f64> = (0..80).map(|i| i as f64 * 0.02).collect();
        let mut flux = vec![1.0; 80];
        flux[25] = 0.95;
        flux[55] = 0.95;
        NumericSeries::new(time, flux).unwrap()
    }

    #[test]
    fn blank_version_falls_back_to_default() {
        assert_eq!(ModelConfig::from_version(None).model_version, DEFAULT_MODEL_VERSION);
        assert_eq!(ModelConfig::from_version(Some("  ".into())).model_version, DEFAULT_MODEL_VERSION);
        assert_eq!(ModelConfig::from_version(Some(" 2.0 ".into())).model_version, "2.0");
    }

    #[test]
    fn version_is_echoed_in_summary() {
        let model = TransitModel::new(ModelConfig {
            model_version: "test-7".to_string(),
        });
        let result = model.analyze(&series());
        assert_eq!(result.summary.model_version, "test-7");
    }

    #[test]
    fn repeated_inference_is_identical() {
        let model = TransitModel::default();
        let s = series();
        let a = serde_json::to_string(&model.analyze(&s)).unwrap();
        let b = serde_json::to_string(&model.analyze(&s)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shared_model_is_usable_across_threads() {
        let model = TransitModel::default();
        let s = series();
        let expected = model.analyze(&s);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| model.analyze(&s))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
