//! One-sided spectrum derivation
//!
//! Turns a forward-transformed signal into physically scaled frequency bins

use super::fft::{transform, FftError};
use num_complex::Complex64;

/// One-sided magnitude spectrum of a real-valued input signal.
///
/// For a transform of length N both sequences have `N/2 + 1` elements: the
/// non-negative-frequency half plus the Nyquist bin, sufficient by conjugate
/// symmetry.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin center frequencies in Hz, `frequencies[k] = k * rate / N`
    pub frequencies: Vec<f64>,

    /// Bin magnitudes, `magnitudes[k] = 2 * |X[k]| / N`
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Number of frequency bins
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Strongest bin as a `(frequency, magnitude)` pair
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|&(_, a), &(_, b)| a.total_cmp(b))
            .map(|(k, &magnitude)| (self.frequencies[k], magnitude))
    }
}

/// Offline spectrum analyzer for a fixed sample rate.
///
/// The single entry point for the transform-and-derive pipeline; both the
/// audio path and synthetic signals go through the same instance methods.
#[derive(Debug, Clone)]
pub struct SpectrumAnalyzer {
    sample_rate: f64,
}

impl SpectrumAnalyzer {
    /// Create an analyzer for signals sampled at `sample_rate` Hz
    pub fn new(sample_rate: f64) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Forward-transform `samples` and derive the one-sided spectrum.
    ///
    /// # Errors
    /// `FftError::InvalidLength` when the sample count is not a power of two;
    /// use [`analyze_padded`](Self::analyze_padded) for arbitrary lengths.
    pub fn analyze(&self, samples: &[f32]) -> Result<Spectrum, FftError> {
        let mut signal = to_complex(samples);
        transform(&mut signal, false)?;
        Ok(self.derive_spectrum(&signal))
    }

    /// Zero-pad `samples` to the next power of two, then analyze.
    ///
    /// Padding narrows the bin width to `rate / N_padded`; magnitudes are
    /// scaled by the padded length.
    pub fn analyze_padded(&self, samples: &[f32]) -> Spectrum {
        let padded = samples.len().next_power_of_two();
        if padded != samples.len() {
            log::debug!(
                "Zero-padding {} samples to {} (bin width {:.4} Hz)",
                samples.len(),
                padded,
                self.sample_rate / padded as f64
            );
        }

        let mut signal = to_complex(samples);
        signal.resize(padded, Complex64::new(0.0, 0.0));
        transform(&mut signal, false).expect("padded length is a power of two");
        self.derive_spectrum(&signal)
    }

    /// Derive the one-sided spectrum of an already forward-transformed signal.
    ///
    /// The factor 2 compensating for the discarded negative-frequency half is
    /// applied uniformly, DC and Nyquist bins included.
    pub fn derive_spectrum(&self, signal: &[Complex64]) -> Spectrum {
        let n = signal.len();
        if n == 0 {
            return Spectrum {
                frequencies: Vec::new(),
                magnitudes: Vec::new(),
            };
        }

        let half = n / 2 + 1;
        let mut frequencies = Vec::with_capacity(half);
        let mut magnitudes = Vec::with_capacity(half);
        for k in 0..half {
            frequencies.push(k as f64 * self.sample_rate / n as f64);
            magnitudes.push(2.0 * signal[k].norm() / n as f64);
        }

        Spectrum {
            frequencies,
            magnitudes,
        }
    }

    /// Elapsed-seconds axis for the time-domain plot, `time[i] = i / rate`
    pub fn time_axis(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / self.sample_rate).collect()
    }
}

fn to_complex(samples: &[f32]) -> Vec<Complex64> {
    samples
        .iter()
        .map(|&s| Complex64::new(f64::from(s), 0.0))
        .collect()
}
