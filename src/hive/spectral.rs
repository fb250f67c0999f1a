use std::sync::Arc;

use log::debug;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Cumulative-energy spectrum builder.
///
/// Segments a PCM stream into 50%-overlapping Hann windows, runs a forward
/// FFT per window and adds each bin magnitude into a single master spectrum.
/// Accumulation is strictly additive across windows; the spectrum is never
/// reset or averaged mid-capture.
pub struct SpectralAccumulator {
    window_size: usize,
    hop: usize,
    fft: Arc<dyn Fft<f32>>,
    hann: Vec<f32>,
    spectrum: Vec<f32>,
    windows: usize,
}

impl SpectralAccumulator {
    /// Create an accumulator for the given window length.
    ///
    /// # Panics
    /// Panics if `window_size` is less than 2.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size >= 2, "window size must be at least 2");

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_size);

        Self {
            window_size,
            hop: window_size / 2,
            fft,
            hann: hann_window(window_size),
            spectrum: vec![0.0; window_size / 2 + 1],
            windows: 0,
        }
    }

    /// Accumulate every full window in `samples`.
    ///
    /// Windows start at offset 0 and advance by the hop. A final partial
    /// window is skipped, never zero-padded; fewer than `window_size`
    /// samples leave the spectrum untouched.
    pub fn process(&mut self, samples: &[i16]) {
        let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); self.window_size];

        let mut pos = 0;
        while pos + self.window_size <= samples.len() {
            for (i, slot) in buffer.iter_mut().enumerate() {
                *slot = Complex::new(samples[pos + i] as f32 * self.hann[i], 0.0);
            }
            self.fft.process(&mut buffer);

            // Non-negative-frequency bins only: spectrum holds W/2+1 entries.
            for (bin, value) in self.spectrum.iter_mut().zip(&buffer) {
                *bin += (value.re * value.re + value.im * value.im).sqrt();
            }

            self.windows += 1;
            pos += self.hop;
        }

        debug!(
            "accumulated {} windows of {} samples",
            self.windows, self.window_size
        );
    }

    /// Windows accumulated so far.
    pub fn windows(&self) -> usize {
        self.windows
    }

    /// Finish accumulation and hand over the master spectrum
    /// (`window_size / 2 + 1` bins).
    pub fn into_spectrum(self) -> Vec<f32> {
        self.spectrum
    }
}

/// Hann coefficients `0.5 * (1 - cos(2π i / (N - 1)))`.
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sinusoid centered on spectrum bin `bin` for the given window size.
    fn tone(bin: usize, window_size: usize, len: usize, amplitude: f32) -> Vec<i16> {
        (0..len)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * bin as f32 * i as f32 / window_size as f32;
                (amplitude * phase.sin()) as i16
            })
            .collect()
    }

    #[test]
    fn test_hann_window_tapers_edges() {
        let hann = hann_window(256);
        assert!(hann[0].abs() < 1e-6);
        assert!(hann[255].abs() < 1e-6);
        assert!((hann[128] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_sub_window_capture_yields_zero_spectrum() {
        let mut accumulator = SpectralAccumulator::new(256);
        accumulator.process(&tone(16, 256, 100, 8000.0));

        assert_eq!(accumulator.windows(), 0);
        let spectrum = accumulator.into_spectrum();
        assert_eq!(spectrum.len(), 129);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_silence_yields_zero_spectrum() {
        let mut accumulator = SpectralAccumulator::new(256);
        accumulator.process(&vec![0i16; 512]);

        assert_eq!(accumulator.windows(), 3);
        assert!(accumulator.into_spectrum().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_peak_bin_matches_tone_frequency() {
        let mut accumulator = SpectralAccumulator::new(256);
        accumulator.process(&tone(16, 256, 256, 8000.0));

        let spectrum = accumulator.into_spectrum();
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 16);
    }

    #[test]
    fn test_accumulation_is_additive_across_windows() {
        // An even-numbered bin shifts phase by a whole cycle per hop, so
        // every window of the tone is sample-identical and the accumulated
        // peak must scale with the window count.
        let samples_one = tone(16, 256, 256, 8000.0); // 1 window
        let samples_three = tone(16, 256, 512, 8000.0); // 3 windows at hop 128

        let mut single = SpectralAccumulator::new(256);
        single.process(&samples_one);
        assert_eq!(single.windows(), 1);
        let single_peak = single.into_spectrum()[16];

        let mut triple = SpectralAccumulator::new(256);
        triple.process(&samples_three);
        assert_eq!(triple.windows(), 3);
        let triple_peak = triple.into_spectrum()[16];

        assert!(single_peak > 0.0);
        let ratio = triple_peak / single_peak;
        assert!((ratio - 3.0).abs() < 1e-3, "ratio was {}", ratio);
    }
}
