use log::{info, warn};

use super::model::{ElementDataset, ElementFrequency, FrequencyDataset};

// ---------------------------------------------------------------------------
// Energy -> frequency
// ---------------------------------------------------------------------------

/// Attach `Frequency_Hz = Ionization_Energy_eV / h` to every record.
///
/// Length and order are preserved. Zero or negative energies are kept (their
/// frequency is zero or negative); see [`anomalies`].
pub fn derive_frequency(dataset: &ElementDataset, planck_ev_s: f64) -> FrequencyDataset {
    let elements = dataset
        .records
        .iter()
        .map(|rec| ElementFrequency {
            element: rec.clone(),
            frequency_hz: rec.ionization_energy_ev / planck_ev_s,
        })
        .collect();
    FrequencyDataset { elements }
}

/// Elements whose ionization energy is not positive.
pub fn anomalies(dataset: &FrequencyDataset) -> impl Iterator<Item = &ElementFrequency> {
    dataset
        .elements
        .iter()
        .filter(|ef| ef.element.ionization_energy_ev <= 0.0)
}

pub fn log_anomalies(dataset: &FrequencyDataset) {
    for ef in anomalies(dataset) {
        warn!(
            "{}: non-positive ionization energy ({} eV), frequency is {} Hz",
            ef.symbol(),
            ef.element.ionization_energy_ev,
            ef.frequency_hz
        );
    }
}

// ---------------------------------------------------------------------------
// Octave bands
// ---------------------------------------------------------------------------

/// `count` boundaries starting at `base`, each double the previous.
pub fn octave_bounds(base: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| base * 2f64.powi(i as i32)).collect()
}

/// Index `i` of the band `[bounds[i], bounds[i + 1])` containing `freq`.
/// `None` below the first or at/above the last boundary.
pub fn octave_band(freq: f64, bounds: &[f64]) -> Option<usize> {
    bounds
        .windows(2)
        .position(|w| freq >= w[0] && freq < w[1])
}

/// Element counts per octave band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandSummary {
    /// `counts[i]` is the number of elements in band `i`.
    pub counts: Vec<usize>,
    pub below: usize,
    pub above: usize,
}

pub fn band_summary(dataset: &FrequencyDataset, bounds: &[f64]) -> BandSummary {
    let mut summary = BandSummary {
        counts: vec![0; bounds.len().saturating_sub(1)],
        ..Default::default()
    };
    let (lo, hi) = match (bounds.first(), bounds.last()) {
        (Some(lo), Some(hi)) => (*lo, *hi),
        _ => {
            summary.below = dataset.len();
            return summary;
        }
    };
    for f in dataset.frequencies() {
        match octave_band(f, bounds) {
            Some(i) => summary.counts[i] += 1,
            None if f < lo => summary.below += 1,
            None => {
                debug_assert!(f >= hi);
                summary.above += 1;
            }
        }
    }
    summary
}

/// Log how the dataset spreads over the bands.
pub fn log_band_summary(summary: &BandSummary, bounds: &[f64]) {
    for (i, count) in summary.counts.iter().enumerate() {
        info!(
            "octave {i}: [{:.1e}, {:.1e}) Hz -> {count} elements",
            bounds[i],
            bounds[i + 1]
        );
    }
    if summary.below > 0 || summary.above > 0 {
        info!(
            "outside octave range: {} below, {} above",
            summary.below, summary.above
        );
    }
}
