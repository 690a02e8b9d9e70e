use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::ChartConfig;
use crate::data::loader::load_file;
use crate::data::model::FrequencyDataset;
use crate::data::transform::{
    band_summary, derive_frequency, log_anomalies, log_band_summary, octave_bounds,
};
use crate::error::LoadError;
use crate::render::{write_chart, ChartData, ChartRenderer, PlottersRenderer};

// ---------------------------------------------------------------------------
// Pipeline: load → derive → bounds → render
// ---------------------------------------------------------------------------

pub struct OctaveChartApp {
    pub config: ChartConfig,
}

impl Default for OctaveChartApp {
    fn default() -> Self {
        Self {
            config: ChartConfig::default(),
        }
    }
}

impl OctaveChartApp {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Steps up to (not including) rendering. Nothing is written.
    pub fn prepare(&self) -> Result<(FrequencyDataset, Vec<f64>)> {
        let cfg = &self.config;
        let dataset = load_file(&cfg.input_path)
            .with_context(|| format!("loading {}", cfg.input_path.display()))?;
        let frequencies = derive_frequency(&dataset, cfg.planck_ev_s);
        let bounds = octave_bounds(cfg.octave_base_hz, cfg.octave_bound_count);
        log_anomalies(&frequencies);
        log_band_summary(&band_summary(&frequencies, &bounds), &bounds);
        for key in &cfg.key_elements {
            match frequencies.get(key) {
                Some(ef) => debug!("key element {ef}"),
                None => debug!("key element {key} not in the table"),
            }
        }
        Ok((frequencies, bounds))
    }

    /// Full run with the PNG backend. Returns the written chart path.
    pub fn run(&self) -> Result<PathBuf> {
        let renderer = PlottersRenderer::new(self.config.size, self.config.style.clone());
        self.run_with(&renderer)
    }

    pub fn run_with(&self, renderer: &dyn ChartRenderer) -> Result<PathBuf> {
        let (frequencies, bounds) = self.prepare()?;
        let chart = ChartData::new(&frequencies, &bounds, &self.config);
        let out = self.config.output_path();
        info!("rendering {} bars to {}", chart.bars.len(), out.display());
        write_chart(renderer, &chart, &out).context("rendering chart")
    }
}

/// Distinct process status per failure kind.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::InputNotFound { .. }) => 2,
        Some(LoadError::MalformedInput { .. }) => 3,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn exit_codes_by_kind() {
        let not_found = anyhow::Error::new(LoadError::InputNotFound {
            path: PathBuf::from("x.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
        .context("loading x.csv");
        assert_eq!(exit_code(&not_found), 2);

        let malformed =
            anyhow::Error::new(LoadError::malformed(Some(1), "Symbol", "empty symbol"));
        assert_eq!(exit_code(&malformed), 3);

        let render = anyhow::Error::new(RenderError::EmptyDataset);
        assert_eq!(exit_code(&render), 1);
    }

    #[test]
    fn missing_input_fails_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig {
            input_path: dir.path().join("missing.csv"),
            output_dir: dir.path().join("output"),
            ..ChartConfig::default()
        };
        let app = OctaveChartApp::new(config);
        let err = app.run().unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert!(!app.config.output_path().exists());
        assert!(!app.config.output_dir.exists());
    }
}
