//! Additive Gaussian noise and invalid-pixel dropout for synthetic frames.
//!
//! The retrieval of normal deviates uses the Box–Muller transform over the
//! generator's uniform stream; deviates are consumed in pairs so the
//! sequence is fully determined by the RNG state.
use crate::frame::{DepthFrame, FrameF32};
use rand::Rng;
use std::f32::consts::TAU;

/// Add zero-mean Gaussian noise with standard deviation `sigma_mm` to every
/// sample. `sigma_mm <= 0` is a no-op, keeping the RNG state untouched.
pub fn add_gaussian_noise<R: Rng>(rng: &mut R, frame: &mut FrameF32, sigma_mm: f32) {
    if sigma_mm <= 0.0 {
        return;
    }
    let mut pending: Option<f32> = None;
    for v in &mut frame.data {
        let z = match pending.take() {
            Some(z) => z,
            None => {
                let (z0, z1) = box_muller(rng);
                pending = Some(z1);
                z0
            }
        };
        *v += sigma_mm * z;
    }
}

/// Zero out a random fraction of samples, simulating measurement dropout.
pub fn apply_dropout<R: Rng>(rng: &mut R, frame: &mut DepthFrame, rate: f32) {
    if rate <= 0.0 {
        return;
    }
    for v in &mut frame.data {
        if rng.gen::<f32>() < rate {
            *v = 0;
        }
    }
}

fn box_muller<R: Rng>(rng: &mut R) -> (f32, f32) {
    // u1 in (0, 1] keeps the logarithm finite
    let u1: f32 = 1.0 - rng.gen::<f32>();
    let u2: f32 = rng.gen();
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = TAU * u2;
    (r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn zero_sigma_leaves_frame_and_rng_untouched() {
        let mut rng = Pcg64::seed_from_u64(7);
        let mut frame = FrameF32::new(16, 16);
        for v in &mut frame.data {
            *v = 300.0;
        }
        add_gaussian_noise(&mut rng, &mut frame, 0.0);
        assert!(frame.data.iter().all(|&v| v == 300.0));

        let mut reference = Pcg64::seed_from_u64(7);
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn noise_statistics_match_sigma() {
        let mut rng = Pcg64::seed_from_u64(42);
        let mut frame = FrameF32::new(200, 200);
        add_gaussian_noise(&mut rng, &mut frame, 10.0);

        let n = frame.data.len() as f32;
        let mean = frame.data.iter().sum::<f32>() / n;
        let var = frame.data.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
        assert!(mean.abs() < 0.5, "mean {mean} too far from 0");
        assert!((var.sqrt() - 10.0).abs() < 0.5, "std {} off", var.sqrt());
    }

    #[test]
    fn dropout_rate_is_roughly_honored() {
        let mut rng = Pcg64::seed_from_u64(3);
        let mut frame = DepthFrame::new(200, 200);
        for v in &mut frame.data {
            *v = 300;
        }
        apply_dropout(&mut rng, &mut frame, 0.05);
        let dropped = frame.data.iter().filter(|&&v| v == 0).count();
        let rate = dropped as f32 / frame.data.len() as f32;
        assert!((rate - 0.05).abs() < 0.01, "dropout rate {rate}");
    }
}
