use std::io::Read;

use log::info;
use serde::{Deserialize, Serialize};

use super::acoustic::{self, BeeFlags};
use super::capture::{Capture, FormatError};
use super::config::AnalysisConfig;
use super::environment;
use super::spectral::SpectralAccumulator;
use super::LevelFlag;

/// Hive-health report for one capture.
///
/// Field set and spelling are fixed: the database uplink consumes this shape
/// as-is. Assembled exactly once per capture and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub weight: u32,
    pub humidity: u32,
    pub temperature: u32,
    pub humidity_flag: LevelFlag,
    pub temperature_flag: LevelFlag,
    pub bee_flags: BeeFlags,
    pub spectrum: Vec<f32>,
}

/// Run the full analysis over a decoded capture.
pub fn analyze(capture: &Capture, config: &AnalysisConfig) -> Report {
    let mut accumulator = SpectralAccumulator::new(config.window_size);
    accumulator.process(&capture.samples);
    info!(
        "capture: {} samples, {} windows of {}",
        capture.samples.len(),
        accumulator.windows(),
        config.window_size
    );
    let spectrum = accumulator.into_spectrum();

    let bee_flags = acoustic::classify(&spectrum, config);

    Report {
        weight: capture.header.weight,
        humidity: capture.header.humidity,
        temperature: capture.header.temperature,
        humidity_flag: environment::classify_reading(capture.header.humidity, config.humidity),
        temperature_flag: environment::classify_reading(
            capture.header.temperature,
            config.temperature,
        ),
        bee_flags,
        spectrum,
    }
}

/// Decode a capture from a byte source and analyze it in one shot.
///
/// Fails with [`FormatError`] before any window is processed if the header
/// is short; truncated audio only shortens the accumulated spectrum.
pub fn process_capture<R: Read>(source: R, config: &AnalysisConfig) -> Result<Report, FormatError> {
    let capture = Capture::read_from(source)?;
    Ok(analyze(&capture, config))
}
