//! Spectroscope - Offline Audio Spectrum Plotter
//!
//! Decodes an audio file, runs an in-place radix-2 FFT and renders the
//! time-domain and frequency-domain signals.

pub mod audio;
pub mod render;
pub mod spectrum;

pub use audio::{load_audio_file, AudioData};
pub use render::{render_analysis, PlotConfig};
pub use spectrum::{Spectrum, SpectrumAnalyzer};
