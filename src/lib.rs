//! Ionization-frequency octave chart.
//!
//! Reads a table of elements with their first ionization energy, converts the
//! energy to a frequency (`E / h`), and draws one bar per element on a log
//! frequency axis with octave boundaries overlaid.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod render;

pub use app::{exit_code, OctaveChartApp};
pub use config::ChartConfig;
pub use error::{LoadError, RenderError};
