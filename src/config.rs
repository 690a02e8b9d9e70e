use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Planck constant in eV·s.
pub const PLANCK_EV_S: f64 = 4.1357e-15;

/// Lowest octave boundary in Hz.
pub const OCTAVE_BASE_HZ: f64 = 1e15;

/// Number of octave boundaries (the base plus five doublings).
pub const OCTAVE_BOUND_COUNT: usize = 6;

/// Elements whose frequency is written above their bar.
pub const KEY_ELEMENTS: [&str; 8] = ["H", "He", "Li", "Be", "O", "Ne", "Na", "Cl"];

/// Everything the run needs, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Source table (csv / json / parquet).
    pub input_path: PathBuf,
    /// Directory the chart is written into; created if absent.
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Canvas size in pixels.
    pub size: (u32, u32),
    pub planck_ev_s: f64,
    pub octave_base_hz: f64,
    pub octave_bound_count: usize,
    pub key_elements: Vec<String>,
    pub style: ChartStyle,
}

/// Presentation constants handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub bar_fill: (u8, u8, u8),
    pub bar_edge: (u8, u8, u8),
    pub bound_color: (u8, u8, u8),
    pub bound_alpha: f64,
    /// Colour bars by the octave band they fall in.
    pub color_by_band: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Periodic Table Arranged by Ionization Frequency (Octave Grouping)".to_string(),
            x_desc: "Element Symbol".to_string(),
            y_desc: "Frequency (Hz) - Log Scale".to_string(),
            bar_fill: (0x4f, 0xa3, 0xf5),
            bar_edge: (0x1a, 0x48, 0x7f),
            bound_color: (0xff, 0x6b, 0x6b),
            bound_alpha: 0.7,
            color_by_band: true,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/elements.csv"),
            output_dir: PathBuf::from("output"),
            output_file: "periodic_table_frequency.png".to_string(),
            // 16 x 8 inches at 300 dpi
            size: (4800, 2400),
            planck_ev_s: PLANCK_EV_S,
            octave_base_hz: OCTAVE_BASE_HZ,
            octave_bound_count: OCTAVE_BOUND_COUNT,
            key_elements: KEY_ELEMENTS.iter().map(|s| s.to_string()).collect(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    /// Full path of the chart artifact.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn is_key_element(&self, symbol: &str) -> bool {
        self.key_elements.iter().any(|k| k == symbol)
    }
}
