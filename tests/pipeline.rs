//! End-to-end tests: table on disk -> derived frequencies -> chart artifact.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use ionization_octaves::config::ChartConfig;
use ionization_octaves::data::loader::load_file;
use ionization_octaves::data::transform::{derive_frequency, octave_bounds, octave_band};
use ionization_octaves::render::{ChartData, ChartRenderer};
use ionization_octaves::{exit_code, OctaveChartApp, RenderError};

// ============================================================================
// Helpers
// ============================================================================

/// Captures what would have been drawn and writes a placeholder file.
#[derive(Default)]
struct RecordingRenderer {
    seen: RefCell<Option<ChartData>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, chart: &ChartData, path: &Path) -> Result<(), RenderError> {
        *self.seen.borrow_mut() = Some(chart.clone());
        fs::write(path, b"chart").map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn config_in(dir: &Path, input: &str, contents: &str) -> ChartConfig {
    let input_path = dir.join(input);
    fs::write(&input_path, contents).unwrap();
    ChartConfig {
        input_path,
        output_dir: dir.join("output"),
        ..ChartConfig::default()
    }
}

fn bundled_table() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("elements.csv")
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn hydrogen_and_helium_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(
        dir.path(),
        "elements.csv",
        "Symbol,Ionization_Energy_eV\nH,13.6\nHe,24.6\n",
    );
    let app = OctaveChartApp::new(config);
    let renderer = RecordingRenderer::default();

    let out = app.run_with(&renderer).unwrap();
    assert_eq!(out, app.config.output_path());
    assert!(out.exists());

    let chart = renderer.seen.borrow().clone().unwrap();
    assert_eq!(chart.bounds, vec![1e15, 2e15, 4e15, 8e15, 1.6e16, 3.2e16]);
    let freqs: Vec<f64> = chart.bars.iter().map(|b| b.frequency_hz).collect();
    assert!((freqs[0] / 3.2886e15 - 1.0).abs() < 1e-3);
    assert!((freqs[1] / 5.9487e15 - 1.0).abs() < 1e-3);
    assert_eq!(chart.bars[0].band, Some(1));
    assert_eq!(chart.bars[1].band, Some(2));
    assert_eq!(chart.bars[0].annotation.as_deref(), Some("3.3e15"));
    assert_eq!(chart.bars[1].annotation.as_deref(), Some("5.9e15"));
}

#[test]
fn output_directory_is_created_and_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "elements.csv", "Symbol,Ionization_Energy_eV\nLi,5.392\n");
    let app = OctaveChartApp::new(config);
    assert!(!app.config.output_dir.exists());

    fs::create_dir_all(&app.config.output_dir).unwrap();
    fs::write(app.config.output_path(), b"stale").unwrap();

    app.run_with(&RecordingRenderer::default()).unwrap();
    assert_eq!(fs::read(app.config.output_path()).unwrap(), b"chart");

    let leftovers: Vec<_> = fs::read_dir(&app.config.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "{leftovers:?}");
}

#[test]
fn missing_input_produces_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = ChartConfig {
        input_path: dir.path().join("does-not-exist.csv"),
        output_dir: dir.path().join("output"),
        ..ChartConfig::default()
    };
    let app = OctaveChartApp::new(config);
    let renderer = RecordingRenderer::default();

    let err = app.run_with(&renderer).unwrap_err();
    assert_eq!(exit_code(&err), 2);
    assert!(format!("{err:#}").contains("does-not-exist.csv"));
    assert!(renderer.seen.borrow().is_none());
    assert!(!app.config.output_path().exists());
}

#[test]
fn malformed_row_produces_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(
        dir.path(),
        "elements.csv",
        "Symbol,Ionization_Energy_eV\nH,13.6\nHe,N/A\n",
    );
    let app = OctaveChartApp::new(config);
    let renderer = RecordingRenderer::default();

    let err = app.run_with(&renderer).unwrap_err();
    assert_eq!(exit_code(&err), 3);
    let msg = format!("{err:#}");
    assert!(msg.contains("row 2"), "{msg}");
    assert!(msg.contains("Ionization_Energy_eV"), "{msg}");
    assert!(renderer.seen.borrow().is_none());
    assert!(!app.config.output_path().exists());
}

#[test]
fn header_only_table_fails_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), "elements.csv", "Symbol,Ionization_Energy_eV\n");
    let app = OctaveChartApp::new(config);

    let err = app.run().unwrap_err();
    assert_eq!(exit_code(&err), 1);
    assert!(matches!(
        err.downcast_ref::<RenderError>(),
        Some(RenderError::EmptyDataset)
    ));
    assert!(!app.config.output_path().exists());
}

#[test]
fn json_input_runs_through() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(
        dir.path(),
        "elements.json",
        r#"[{"Symbol": "O", "Ionization_Energy_eV": 13.618}, {"Symbol": "Ne", "Ionization_Energy_eV": 21.565}]"#,
    );
    let app = OctaveChartApp::new(config);
    let renderer = RecordingRenderer::default();
    app.run_with(&renderer).unwrap();

    let chart = renderer.seen.borrow().clone().unwrap();
    let symbols: Vec<&str> = chart.bars.iter().map(|b| b.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["O", "Ne"]);
    assert!(chart.bars.iter().all(|b| b.annotation.is_some()));
}

// ============================================================================
// Bundled dataset
// ============================================================================

#[test]
fn bundled_table_loads_in_order() {
    let ds = load_file(&bundled_table()).unwrap();
    assert_eq!(ds.len(), 36);
    let symbols: Vec<&str> = ds.symbols().collect();
    assert_eq!(&symbols[..4], &["H", "He", "Li", "Be"]);
    assert_eq!(symbols.last(), Some(&"Kr"));

    let freq = derive_frequency(&ds, ionization_octaves::config::PLANCK_EV_S);
    assert_eq!(freq.len(), ds.len());
    assert_eq!(freq.symbols().collect::<Vec<_>>(), symbols);

    // Every first ionization energy from H to Kr lands inside the octave range.
    let bounds = octave_bounds(1e15, 6);
    for ef in &freq.elements {
        assert!(octave_band(ef.frequency_hz, &bounds).is_some(), "{ef}");
    }
}

#[test]
fn png_chart_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let table = fs::read_to_string(bundled_table()).unwrap();
    let config = ChartConfig {
        size: (1200, 600),
        ..config_in(dir.path(), "elements.csv", &table)
    };
    let app = OctaveChartApp::new(config);

    let out = app.run().unwrap();
    let (w, h) = image::image_dimensions(&out).unwrap();
    assert_eq!((w, h), (1200, 600));
}
