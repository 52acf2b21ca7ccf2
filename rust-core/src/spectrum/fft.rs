//! In-place radix-2 FFT
//!
//! Iterative Cooley-Tukey decimation-in-time over a caller-owned buffer

use num_complex::Complex64;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FftError {
    #[error("Signal length {0} is not a power of two")]
    InvalidLength(usize),
}

/// Transform `signal` in place.
///
/// Forward (`inverse = false`) computes the unnormalized DFT; inverse
/// (`inverse = true`) applies the conjugate twiddles and divides by N, so a
/// forward/inverse round trip reconstructs the input.
///
/// # Arguments
/// * `signal` - Buffer to transform; length must be a power of two (1 is fine)
/// * `inverse` - Transform direction
///
/// # Errors
/// `FftError::InvalidLength` when the length is not a power of two.
pub fn transform(signal: &mut [Complex64], inverse: bool) -> Result<(), FftError> {
    let n = signal.len();
    if !n.is_power_of_two() {
        return Err(FftError::InvalidLength(n));
    }
    // A single sample is its own transform.
    if n == 1 {
        return Ok(());
    }

    bit_reverse_permute(signal);

    let sign = if inverse { 1.0 } else { -1.0 };
    let mut len = 2;
    while len <= n {
        let theta = 2.0 * sign * PI / len as f64;
        let step = Complex64::new(theta.cos(), theta.sin());
        for block in signal.chunks_exact_mut(len) {
            let (evens, odds) = block.split_at_mut(len / 2);
            let mut twiddle = Complex64::new(1.0, 0.0);
            for (even, odd) in evens.iter_mut().zip(odds.iter_mut()) {
                let t = twiddle * *odd;
                *odd = *even - t;
                *even += t;
                twiddle *= step;
            }
        }
        len <<= 1;
    }

    if inverse {
        let scale = 1.0 / n as f64;
        for value in signal.iter_mut() {
            *value *= scale;
        }
    }

    Ok(())
}

/// Reorder `signal` so each element lands at the bit-reversal of its index,
/// the input order the bottom-up butterfly passes expect.
fn bit_reverse_permute(signal: &mut [Complex64]) {
    let n = signal.len();
    let shift = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> shift;
        if j > i {
            signal.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;

    const TOLERANCE: f64 = 1e-9;

    /// Deterministic broadband test signal.
    fn test_signal(n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Complex64::new((0.7 * t).sin() + 0.3 * (1.9 * t).cos(), (0.2 * t).sin())
            })
            .collect()
    }

    fn assert_close(a: &[Complex64], b: &[Complex64], tolerance: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(
                (x - y).norm() < tolerance,
                "mismatch: {} vs {} (tolerance {})",
                x,
                y,
                tolerance
            );
        }
    }

    #[test]
    fn test_length_one_is_identity() {
        for inverse in [false, true] {
            let mut signal = vec![Complex64::new(0.25, -1.5)];
            transform(&mut signal, inverse).unwrap();
            assert_eq!(signal[0], Complex64::new(0.25, -1.5));
        }
    }

    #[test]
    fn test_rejects_non_power_of_two_lengths() {
        for n in [0usize, 3, 5, 6, 12, 100, 1000] {
            let mut signal = vec![Complex64::new(0.0, 0.0); n];
            assert_eq!(
                transform(&mut signal, false),
                Err(FftError::InvalidLength(n))
            );
        }
    }

    #[test]
    fn test_unit_impulse_transforms_to_all_ones() {
        let mut signal = vec![Complex64::new(0.0, 0.0); 4];
        signal[0] = Complex64::new(1.0, 0.0);

        transform(&mut signal, false).unwrap();

        for value in &signal {
            assert!((value - Complex64::new(1.0, 0.0)).norm() < TOLERANCE);
        }
    }

    #[test]
    fn test_round_trip_reconstructs_input() {
        for exp in 0..=10 {
            let n = 1 << exp;
            let original = test_signal(n);
            let mut signal = original.clone();

            transform(&mut signal, false).unwrap();
            transform(&mut signal, true).unwrap();

            assert_close(&signal, &original, TOLERANCE);
        }
    }

    #[test]
    fn test_parseval_energy() {
        let n = 256;
        let signal = test_signal(n);
        let time_energy: f64 = signal.iter().map(|x| x.norm_sqr()).sum();

        let mut transformed = signal;
        transform(&mut transformed, false).unwrap();
        let freq_energy: f64 =
            transformed.iter().map(|x| x.norm_sqr()).sum::<f64>() / n as f64;

        assert!((time_energy - freq_energy).abs() < 1e-6 * time_energy);
    }

    #[test]
    fn test_matches_rustfft() {
        for n in [2usize, 8, 64, 512] {
            let mut ours = test_signal(n);
            transform(&mut ours, false).unwrap();

            let mut reference: Vec<rustfft::num_complex::Complex64> = test_signal(n)
                .iter()
                .map(|c| rustfft::num_complex::Complex64::new(c.re, c.im))
                .collect();
            FftPlanner::new().plan_fft_forward(n).process(&mut reference);

            for (a, b) in ours.iter().zip(reference.iter()) {
                assert!((a.re - b.re).abs() < TOLERANCE * n as f64);
                assert!((a.im - b.im).abs() < TOLERANCE * n as f64);
            }
        }
    }

    #[test]
    fn test_inverse_normalization_is_one_over_n() {
        // Inverse of all-ones is an impulse of height 1, not N.
        let n = 16;
        let mut signal = vec![Complex64::new(1.0, 0.0); n];
        transform(&mut signal, true).unwrap();

        assert!((signal[0] - Complex64::new(1.0, 0.0)).norm() < TOLERANCE);
        for value in &signal[1..] {
            assert!(value.norm() < TOLERANCE);
        }
    }
}
