//! Plot rendering
//!
//! Draws the time-domain and frequency-domain panels into a single PNG image

use crate::spectrum::Spectrum;
use image::{Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([18, 18, 26]);
const DIVIDER: Rgb<u8> = Rgb([70, 70, 80]);
const WAVEFORM_COLOR: Rgb<u8> = Rgb([96, 180, 255]);
const SPECTRUM_COLOR: Rgb<u8> = Rgb([255, 168, 64]);

/// Plot rendering configuration
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Output image width in pixels
    pub width: u32,

    /// Output image height in pixels
    pub height: u32,

    /// Upper bound of the spectrum panel in Hz; `None` plots up to Nyquist
    pub max_frequency: Option<f64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 780,
            max_frequency: None,
        }
    }
}

/// Render the stacked two-panel plot: waveform on top, spectrum below.
///
/// `time` and `amplitude` are the paired time-domain sequences; samples
/// beyond the shorter of the two are ignored.
pub fn render_analysis(
    time: &[f64],
    amplitude: &[f32],
    spectrum: &Spectrum,
    config: &PlotConfig,
) -> RgbImage {
    let width = config.width.max(2);
    let height = config.height.max(4);
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

    let panel_height = height / 2;
    draw_waveform(&mut image, time, amplitude, 0, panel_height);
    draw_spectrum(
        &mut image,
        spectrum,
        panel_height + 1,
        height - panel_height - 1,
        config.max_frequency,
    );

    for x in 0..width {
        image.put_pixel(x, panel_height, DIVIDER);
    }

    image
}

/// Draw a min/max column envelope of the `(time, amplitude)` pair, columns
/// spanning the time axis.
fn draw_waveform(
    image: &mut RgbImage,
    time: &[f64],
    amplitude: &[f32],
    top: u32,
    panel_height: u32,
) {
    let n = time.len().min(amplitude.len());
    if n == 0 || panel_height < 2 {
        return;
    }

    let width = image.width() as usize;
    let span = time[n - 1] - time[0];

    // Column envelope: min/max of the samples that land on each x.
    let mut lows = vec![f32::INFINITY; width];
    let mut highs = vec![f32::NEG_INFINITY; width];
    for i in 0..n {
        let x = if span > 0.0 {
            (((time[i] - time[0]) / span) * (width - 1) as f64) as usize
        } else {
            0
        };
        let sample = amplitude[i].clamp(-1.0, 1.0);
        lows[x] = lows[x].min(sample);
        highs[x] = highs[x].max(sample);
    }

    let mid = top + panel_height / 2;
    let half_span = f64::from(panel_height / 2).max(1.0) - 1.0;

    for x in 0..width {
        if lows[x] > highs[x] {
            continue;
        }
        let y_high = (f64::from(mid) - f64::from(highs[x]) * half_span) as u32;
        let y_low = (f64::from(mid) - f64::from(lows[x]) * half_span) as u32;
        for y in y_high..=y_low.min(image.height() - 1) {
            image.put_pixel(x as u32, y, WAVEFORM_COLOR);
        }
    }
}

/// Draw peak-normalized magnitude bars over the plotted frequency range.
fn draw_spectrum(
    image: &mut RgbImage,
    spectrum: &Spectrum,
    top: u32,
    panel_height: u32,
    max_frequency: Option<f64>,
) {
    if spectrum.is_empty() || panel_height < 2 {
        return;
    }

    // Clamp the x-axis to the requested frequency range.
    let bins = match max_frequency {
        Some(limit) => spectrum
            .frequencies
            .iter()
            .take_while(|&&f| f <= limit)
            .count()
            .max(1),
        None => spectrum.len(),
    };
    let magnitudes = &spectrum.magnitudes[..bins];
    let peak = magnitudes.iter().cloned().fold(0.0f64, f64::max);
    if peak <= 0.0 {
        return;
    }

    let width = image.width() as usize;
    let bottom = top + panel_height - 1;

    for x in 0..width {
        let start = x * bins / width;
        let end = ((x + 1) * bins / width).max(start + 1).min(bins);

        let magnitude = magnitudes[start..end].iter().cloned().fold(0.0f64, f64::max);
        let bar = (magnitude / peak * f64::from(panel_height - 1)) as u32;
        for y in (bottom - bar)..=bottom.min(image.height() - 1) {
            image.put_pixel(x as u32, y, SPECTRUM_COLOR);
        }
    }
}
