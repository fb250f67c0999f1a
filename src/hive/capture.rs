use std::io::Read;

use thiserror::Error;

/// Capture layout: three little-endian u32 sensor fields, then the audio
/// segment as contiguous little-endian i16 PCM.
pub const HEADER_BYTES: usize = 12;

/// Capture decoding failures.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The byte source ended before the full 12-byte header was read.
    #[error("capture header truncated: fewer than 12 bytes before the sample stream")]
    TruncatedHeader,

    /// The byte source failed mid-read.
    #[error("capture read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Sensor readings from the capture header, in raw sensor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub weight: u32,
    pub humidity: u32,
    pub temperature: u32,
}

/// A fully decoded capture: header fields plus the PCM audio segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub header: RawHeader,
    pub samples: Vec<i16>,
}

impl Capture {
    /// Decode a capture from a byte source.
    ///
    /// Truncated audio is not an error: the sample stream is simply shorter
    /// and a trailing odd byte is discarded. A header shorter than
    /// [`HEADER_BYTES`] is a [`FormatError`].
    pub fn read_from<R: Read>(mut source: R) -> Result<Self, FormatError> {
        let weight = read_u32(&mut source)?;
        let humidity = read_u32(&mut source)?;
        let temperature = read_u32(&mut source)?;

        let mut rest = Vec::new();
        source.read_to_end(&mut rest)?;
        let samples = rest
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            header: RawHeader {
                weight,
                humidity,
                temperature,
            },
            samples,
        })
    }
}

fn read_u32<R: Read>(source: &mut R) -> Result<u32, FormatError> {
    let mut bytes = [0u8; 4];
    source.read_exact(&mut bytes).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => FormatError::TruncatedHeader,
        _ => FormatError::Io(e),
    })?;
    Ok(u32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_bytes(weight: u32, humidity: u32, temperature: u32, samples: &[i16]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&weight.to_le_bytes());
        bytes.extend_from_slice(&humidity.to_le_bytes());
        bytes.extend_from_slice(&temperature.to_le_bytes());
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_parse_header_and_samples() {
        let bytes = capture_bytes(12000, 5200, 9450, &[1, -2, 300, i16::MIN]);
        let capture = Capture::read_from(bytes.as_slice()).unwrap();

        assert_eq!(capture.header.weight, 12000);
        assert_eq!(capture.header.humidity, 5200);
        assert_eq!(capture.header.temperature, 9450);
        assert_eq!(capture.samples, vec![1, -2, 300, i16::MIN]);
    }

    #[test]
    fn test_header_only_capture_has_no_samples() {
        let bytes = capture_bytes(1, 2, 3, &[]);
        let capture = Capture::read_from(bytes.as_slice()).unwrap();
        assert!(capture.samples.is_empty());
    }

    #[test]
    fn test_short_header_is_format_error() {
        let bytes = capture_bytes(1, 2, 3, &[])[..8].to_vec();
        let result = Capture::read_from(bytes.as_slice());
        assert!(matches!(result, Err(FormatError::TruncatedHeader)));
    }

    #[test]
    fn test_empty_source_is_format_error() {
        let empty: &[u8] = &[];
        let result = Capture::read_from(empty);
        assert!(matches!(result, Err(FormatError::TruncatedHeader)));
    }

    #[test]
    fn test_trailing_odd_byte_is_discarded() {
        let mut bytes = capture_bytes(1, 2, 3, &[7, 8]);
        bytes.push(0xAB);
        let capture = Capture::read_from(bytes.as_slice()).unwrap();
        assert_eq!(capture.samples, vec![7, 8]);
    }
}
