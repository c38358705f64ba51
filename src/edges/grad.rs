//! Image gradients (Sobel/Scharr) with magnitude.
//!
//! - Convolves a 3×3 kernel pair (`X` and `Y`) with border clamping.
//! - Outputs per-pixel `gx`, `gy`, `mag = sqrt(gx^2 + gy^2)`.
//!
//! Complexity: O(W·H) per pass; memory: three float planes.
use crate::frame::{FrameF32, FrameView, FrameViewMut};
use serde::{Deserialize, Serialize};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const SCHARR_KERNEL_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_KERNEL_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Kernel pair selection for the gradient operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKernel {
    Sobel,
    /// Better rotational symmetry than Sobel.
    Scharr,
}

/// Per-pixel gradient planes.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: FrameF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: FrameF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: FrameF32,
}

/// Compute gradients of a single-channel float frame.
pub fn image_gradients(l: &FrameF32, kernel: GradientKernel) -> Grad {
    let (kernel_x, kernel_y) = match kernel {
        GradientKernel::Sobel => (&SOBEL_KERNEL_X, &SOBEL_KERNEL_Y),
        GradientKernel::Scharr => (&SCHARR_KERNEL_X, &SCHARR_KERNEL_Y),
    };

    let w = l.w;
    let h = l.h;
    let mut gx = FrameF32::new(w, h);
    let mut gy = FrameF32::new(w, h);
    let mut mag = FrameF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, src_row) in rows.iter().enumerate() {
                let kx_row = &kernel_x[ky];
                let ky_row = &kernel_y[ky];
                sum_x += src_row[x_idx[0]] * kx_row[0]
                    + src_row[x_idx[1]] * kx_row[1]
                    + src_row[x_idx[2]] * kx_row[2];
                sum_y += src_row[x_idx[0]] * ky_row[0]
                    + src_row[x_idx[1]] * ky_row[1]
                    + src_row[x_idx[2]] * ky_row[2];
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
        }
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_contrast_produces_horizontal_gradient() {
        let mut l = FrameF32::new(8, 8);
        for y in 0..8 {
            for x in 4..8 {
                l.set(x, y, 255.0);
            }
        }
        let grad = image_gradients(&l, GradientKernel::Sobel);
        assert!(grad.gx.get(4, 4) > 0.0);
        assert!(grad.gy.get(4, 4).abs() < 1e-3);
        assert!(grad.mag.get(4, 4) > grad.mag.get(1, 4));
    }
}
