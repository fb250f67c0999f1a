pub mod acoustic;
pub mod capture;
pub mod config;
pub mod environment;
pub mod report;
pub mod spectral;

pub use acoustic::BeeFlags;
pub use capture::{Capture, FormatError, RawHeader};
pub use config::AnalysisConfig;
pub use report::{analyze, process_capture, Report};
pub use spectral::SpectralAccumulator;

use serde::{Deserialize, Serialize};

/// Threshold flag for a scalar sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LevelFlag {
    Low,
    Ok,
    High,
}

/// Classification of one brood age band.
///
/// `Indeterminate` means the capture carried no usable brood signal (silent
/// or shorter than one analysis window) and no population ratio exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BandFlag {
    Low,
    Ok,
    High,
    Indeterminate,
}
