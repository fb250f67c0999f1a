use super::config::ThresholdRange;
use super::LevelFlag;

/// Flag a raw sensor reading against its threshold pair.
///
/// Thresholds are exclusive: only readings strictly outside the range are
/// flagged, a reading equal to either bound stays OK.
pub fn classify_reading(value: u32, range: ThresholdRange) -> LevelFlag {
    if value > range.high {
        LevelFlag::High
    } else if value < range.low {
        LevelFlag::Low
    } else {
        LevelFlag::Ok
    }
}
