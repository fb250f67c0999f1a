use log::debug;
use serde::{Deserialize, Serialize};

use super::config::{AnalysisConfig, BandRange};
use super::BandFlag;

/// Acoustic biomarker flags derived from the master spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeeFlags {
    pub queen_present: bool,
    pub multiple_queen: bool,
    pub possible_mites: bool,
    pub three_day_band: BandFlag,
    pub six_day_band: BandFlag,
    pub nine_day_band: BandFlag,
}

impl Default for BeeFlags {
    fn default() -> Self {
        Self {
            queen_present: false,
            multiple_queen: false,
            possible_mites: false,
            three_day_band: BandFlag::Ok,
            six_day_band: BandFlag::Ok,
            nine_day_band: BandFlag::Ok,
        }
    }
}

/// Classify the accumulated spectrum into bee population flags.
///
/// Band amplitudes are read at `round(f / bin_width)`; the same bin width is
/// used for every target frequency, the queen harmonic included. A silent or
/// sub-window capture has a zero brood total and reports every band as
/// `Indeterminate` rather than dividing by it.
pub fn classify(spectrum: &[f32], config: &AnalysisConfig) -> BeeFlags {
    let bin_width = config.bin_width();
    let amp_at = |hz: f32| -> f32 {
        let bin = (hz / bin_width).round() as usize;
        spectrum.get(bin).copied().unwrap_or(0.0)
    };

    let amp_three = amp_at(config.bands.three_day_hz);
    let amp_six = amp_at(config.bands.six_day_hz);
    let amp_nine = amp_at(config.bands.nine_day_hz);
    let amp_queen = amp_at(config.bands.queen_hz);

    // The three measured bands cover ~80% of the colony, so the total is
    // scaled up to stand in for the rest. The queen is a single bee and
    // stays out of the population total.
    let total_brood = config.brood_scale * (amp_three + amp_six + amp_nine);

    let mut flags = BeeFlags::default();

    if total_brood > 0.0 {
        let dist = &config.age_distribution;
        let three_pct = amp_three / total_brood * 100.0;
        let six_pct = amp_six / total_brood * 100.0;
        let nine_pct = amp_nine / total_brood * 100.0;
        debug!(
            "age distribution: 3-day {:.1}%, 6-day {:.1}%, 9-day {:.1}%",
            three_pct, six_pct, nine_pct
        );

        flags.three_day_band = flag_band(three_pct, dist.three_day);
        flags.six_day_band = flag_band(six_pct, dist.six_day);
        flags.nine_day_band = flag_band(nine_pct, dist.nine_day);

        // A thin youngest cohort is the mite tell.
        flags.possible_mites = three_pct < dist.three_day.low;
    } else {
        flags.three_day_band = BandFlag::Indeterminate;
        flags.six_day_band = BandFlag::Indeterminate;
        flags.nine_day_band = BandFlag::Indeterminate;
    }

    // Queen hum should stand clear of the band an octave above her own,
    // where little colony sound is expected.
    let harmonic = amp_at(2.0 * config.bands.queen_hz);
    if amp_queen > 2.0 * harmonic {
        flags.queen_present = true;
        flags.multiple_queen = amp_queen > amp_three;
    }

    flags
}

fn flag_band(percentage: f32, range: BandRange) -> BandFlag {
    if percentage < range.low {
        BandFlag::Low
    } else if percentage > range.high {
        BandFlag::High
    } else {
        BandFlag::Ok
    }
}
