/// Render layer: the data handed to a chart backend, and the backend seam.
///
/// The transform side only builds a [`ChartData`]; everything about pixels
/// lives behind [`ChartRenderer`].

pub mod plot;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::ChartConfig;
use crate::data::model::FrequencyDataset;
use crate::data::transform::octave_band;
use crate::error::RenderError;

pub use plot::PlottersRenderer;

// ---------------------------------------------------------------------------
// ChartData – the renderer contract
// ---------------------------------------------------------------------------

/// One bar per element, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub symbol: String,
    pub frequency_hz: f64,
    /// Octave band the bar falls in, if any.
    pub band: Option<usize>,
    /// Label drawn above the bar; only set for key elements.
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub bars: Vec<Bar>,
    /// Horizontal reference lines, ascending.
    pub bounds: Vec<f64>,
}

/// `4.2e15` style: scientific, one decimal digit.
pub fn format_frequency(freq: f64) -> String {
    format!("{freq:.1e}")
}

impl ChartData {
    pub fn new(dataset: &FrequencyDataset, bounds: &[f64], config: &ChartConfig) -> Self {
        let bars = dataset
            .elements
            .iter()
            .map(|ef| Bar {
                symbol: ef.symbol().to_string(),
                frequency_hz: ef.frequency_hz,
                band: octave_band(ef.frequency_hz, bounds),
                annotation: config
                    .is_key_element(ef.symbol())
                    .then(|| format_frequency(ef.frequency_hz)),
            })
            .collect();
        Self {
            bars,
            bounds: bounds.to_vec(),
        }
    }

    /// Vertical extent for a log axis: covers every positive bar and every
    /// boundary with some headroom.
    pub fn y_range(&self) -> (f64, f64) {
        let values = self
            .bars
            .iter()
            .map(|b| b.frequency_hz)
            .chain(self.bounds.iter().copied())
            .filter(|v| v.is_finite() && *v > 0.0);

        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo.is_finite() && hi.is_finite() {
            (lo / 2.0, hi * 2.0)
        } else {
            (1e14, 1e17)
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer seam
// ---------------------------------------------------------------------------

/// Draws a [`ChartData`] into an image file at `path`.
pub trait ChartRenderer {
    fn render(&self, chart: &ChartData, path: &Path) -> Result<(), RenderError>;
}

/// Render next to `out_path` and move the result into place only once the
/// backend succeeded, so a failed run never leaves a chart behind.
pub fn write_chart(
    renderer: &dyn ChartRenderer,
    chart: &ChartData,
    out_path: &Path,
) -> Result<PathBuf, RenderError> {
    if let Some(dir) = out_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let partial = partial_path(out_path);
    debug!("rendering into {}", partial.display());
    if let Err(err) = renderer.render(chart, &partial) {
        let _ = fs::remove_file(&partial);
        return Err(err);
    }

    fs::rename(&partial, out_path).map_err(|source| {
        let _ = fs::remove_file(&partial);
        RenderError::Io {
            path: out_path.to_path_buf(),
            source,
        }
    })?;
    info!("wrote {}", out_path.display());
    Ok(out_path.to_path_buf())
}

/// `chart.png` -> `chart.partial.png`; the extension is kept so the backend
/// still picks the right encoder.
fn partial_path(out_path: &Path) -> PathBuf {
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chart".to_string());
    let name = match out_path.extension() {
        Some(ext) => format!("{stem}.partial.{}", ext.to_string_lossy()),
        None => format!("{stem}.partial"),
    };
    out_path.with_file_name(name)
}
