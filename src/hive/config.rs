use serde::{Deserialize, Serialize};

/// Threshold pair for a raw sensor reading. Bounds are exclusive: a reading
/// equal to either bound stays OK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRange {
    pub low: u32,
    pub high: u32,
}

/// Acceptable percentage range for one brood age band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandRange {
    pub low: f32,
    pub high: f32,
}

/// Target frequencies of the acoustic biomarkers, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub three_day_hz: f32,
    pub six_day_hz: f32,
    pub nine_day_hz: f32,
    pub queen_hz: f32,
}

/// Expected share of the colony in each measured age band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeDistribution {
    pub three_day: BandRange,
    pub six_day: BandRange,
    pub nine_day: BandRange,
}

/// Full analysis configuration for one capture.
///
/// Defaults mirror the deployed sensor firmware: 16 kHz capture rate and the
/// threshold tables the hive was calibrated against. Any field can be
/// overridden from a JSON config file; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Capture sample rate in Hz.
    pub sample_rate: u32,

    /// FFT window length in samples. Hop is fixed at half a window.
    pub window_size: usize,

    /// Raw-unit humidity thresholds.
    pub humidity: ThresholdRange,

    /// Raw-unit temperature thresholds.
    pub temperature: ThresholdRange,

    /// Biomarker band frequencies.
    pub bands: BandTable,

    /// Healthy age-distribution percentage ranges.
    pub age_distribution: AgeDistribution,

    /// Scale-up applied to the summed brood amplitudes. The three measured
    /// bands cover ~80% of the colony, so the total is scaled by 1.2 to
    /// stand in for the whole population.
    pub brood_scale: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            window_size: 1024,
            humidity: ThresholdRange {
                low: 4500,
                high: 6500,
            },
            temperature: ThresholdRange {
                low: 9300,
                high: 9600,
            },
            bands: BandTable {
                three_day_hz: 285.0,
                six_day_hz: 225.0,
                nine_day_hz: 190.0,
                queen_hz: 400.0,
            },
            age_distribution: AgeDistribution {
                three_day: BandRange {
                    low: 17.9,
                    high: 28.1,
                },
                six_day: BandRange {
                    low: 34.6,
                    high: 47.5,
                },
                nine_day: BandRange {
                    low: 33.2,
                    high: 41.6,
                },
            },
            brood_scale: 1.2,
        }
    }
}

impl AnalysisConfig {
    /// Sample offset between successive window starts (50% overlap).
    pub fn hop(&self) -> usize {
        self.window_size / 2
    }

    /// Frequency resolution of one spectrum bin, in Hz.
    pub fn bin_width(&self) -> f32 {
        self.sample_rate as f32 / self.window_size as f32
    }
}
