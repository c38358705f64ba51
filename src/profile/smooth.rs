//! Gaussian smoothing of dense profiles.
//!
//! Border handling clamps to the edge sample, matching the border mode the
//! 2-D stages use.

/// Normalized 1-D Gaussian taps with radius `ceil(3σ)` (at least 1).
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    assert!(sigma > 0.0, "sigma must be positive");
    let radius = (3.0 * sigma).ceil().max(1.0) as usize;
    let inv_2s2 = 1.0 / (2.0 * sigma * sigma);
    let mut taps = Vec::with_capacity(2 * radius + 1);
    let mut sum = 0.0f32;
    for i in 0..=(2 * radius) {
        let d = i as f32 - radius as f32;
        let t = (-d * d * inv_2s2).exp();
        taps.push(t);
        sum += t;
    }
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Convolve the profile with a Gaussian kernel in place.
pub fn gaussian_smooth(values: &mut Vec<f32>, sigma: f32) {
    let n = values.len();
    if n < 2 {
        return;
    }
    let taps = gaussian_kernel(sigma);
    let radius = taps.len() / 2;

    let mut out = vec![0.0f32; n];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &t) in taps.iter().enumerate() {
            let j = i as isize + k as isize - radius as isize;
            let j = j.clamp(0, n as isize - 1) as usize;
            acc += t * values[j];
        }
        *slot = acc;
    }
    *values = out;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let taps = gaussian_kernel(1.2);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        let n = taps.len();
        for i in 0..n / 2 {
            assert!((taps[i] - taps[n - 1 - i]).abs() < 1e-6);
        }
    }

    #[test]
    fn constant_profile_is_preserved() {
        let mut values = vec![300.0f32; 64];
        gaussian_smooth(&mut values, 1.2);
        for &v in &values {
            assert!((v - 300.0).abs() < 1e-3);
        }
    }
}
