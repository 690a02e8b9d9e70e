use std::process::ExitCode;

use ionization_octaves::{exit_code, OctaveChartApp};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = OctaveChartApp::default();
    match app.run() {
        Ok(path) => {
            log::info!("chart available at {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
