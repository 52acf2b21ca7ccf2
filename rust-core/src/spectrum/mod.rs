//! Spectral analysis with an in-place radix-2 FFT

pub mod analysis;
pub mod fft;

pub use analysis::{Spectrum, SpectrumAnalyzer};
pub use fft::{transform, FftError};
