//! Deterministic base signals for the six synthetic scenes.
//!
//! Each render function is a pure function of its parameters, the camera
//! geometry and the simulated elapsed time; noise and dropout are applied
//! by the generator afterwards. Depth values are float millimeters here;
//! the generator clips and casts to u16.
use super::CameraGeometry;
use crate::frame::{FrameF32, FrameViewMut};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Cylindrical object oscillating horizontally over a flat background.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingObjectScene {
    pub background_mm: f32,
    pub object_mm: f32,
    pub radius_px: f32,
    pub amplitude_px: f32,
}

impl Default for MovingObjectScene {
    fn default() -> Self {
        Self {
            background_mm: 400.0,
            object_mm: 250.0,
            radius_px: 50.0,
            amplitude_px: 150.0,
        }
    }
}

pub fn render_moving_object(cfg: &MovingObjectScene, cam: &CameraGeometry, t: f32, out: &mut FrameF32) {
    let cx = cam.width as f32 * 0.5 + cfg.amplitude_px * (0.8 * t).sin();
    let cy = cam.height as f32 * 0.5;
    let r2 = cfg.radius_px * cfg.radius_px;
    for y in 0..cam.height {
        let row = out.row_mut(y);
        let dy = y as f32 - cy;
        for (x, slot) in row.iter_mut().enumerate() {
            let dx = x as f32 - cx;
            *slot = if dx * dx + dy * dy <= r2 {
                cfg.object_mm
            } else {
                cfg.background_mm
            };
        }
    }
}

/// Sine wave traveling across the surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceWaveScene {
    pub base_mm: f32,
    pub amplitude_mm: f32,
    /// Spatial periods across the frame width.
    pub periods: f32,
}

impl Default for SurfaceWaveScene {
    fn default() -> Self {
        Self {
            base_mm: 300.0,
            amplitude_mm: 50.0,
            periods: 4.0,
        }
    }
}

pub fn render_surface_wave(cfg: &SurfaceWaveScene, cam: &CameraGeometry, t: f32, out: &mut FrameF32) {
    let k = TAU * cfg.periods / cam.width as f32;
    for y in 0..cam.height {
        let row = out.row_mut(y);
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = cfg.base_mm + cfg.amplitude_mm * (k * x as f32 + 2.0 * t).sin();
        }
    }
}

/// Flat background with three progressively closer steps.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSurfaceScene {
    pub background_mm: f32,
    pub step_mms: [f32; 3],
    /// Step start positions as fractions of the frame width.
    pub step_positions: [f32; 3],
}

impl Default for StepSurfaceScene {
    fn default() -> Self {
        Self {
            background_mm: 350.0,
            step_mms: [250.0, 200.0, 150.0],
            step_positions: [0.25, 0.5, 0.75],
        }
    }
}

pub fn render_step_surface(cfg: &StepSurfaceScene, cam: &CameraGeometry, _t: f32, out: &mut FrameF32) {
    let bounds = [
        (cfg.step_positions[0] * cam.width as f32) as usize,
        (cfg.step_positions[1] * cam.width as f32) as usize,
        (cfg.step_positions[2] * cam.width as f32) as usize,
    ];
    for y in 0..cam.height {
        let row = out.row_mut(y);
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = if x >= bounds[2] {
                cfg.step_mms[2]
            } else if x >= bounds[1] {
                cfg.step_mms[1]
            } else if x >= bounds[0] {
                cfg.step_mms[0]
            } else {
                cfg.background_mm
            };
        }
    }
}

/// Low-frequency wave meant to be drowned in noise and dropout.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NoisyDataScene {
    pub base_mm: f32,
    pub amplitude_mm: f32,
    /// Fraction of pixels dropped to "no measurement" (applied by the
    /// generator, scaled by the active noise level).
    pub invalid_rate: f32,
}

impl Default for NoisyDataScene {
    fn default() -> Self {
        Self {
            base_mm: 300.0,
            amplitude_mm: 80.0,
            invalid_rate: 0.05,
        }
    }
}

pub fn render_noisy_data(cfg: &NoisyDataScene, cam: &CameraGeometry, t: f32, out: &mut FrameF32) {
    let k = TAU * 2.0 / cam.width as f32;
    for y in 0..cam.height {
        let row = out.row_mut(y);
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = cfg.base_mm + cfg.amplitude_mm * (k * x as f32 + t).sin();
        }
    }
}

/// Box and cylinder over a distant background, drifting slowly.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeObjectsScene {
    pub background_mm: f32,
    pub box_mm: f32,
    pub cylinder_mm: f32,
}

impl Default for CompositeObjectsScene {
    fn default() -> Self {
        Self {
            background_mm: 450.0,
            box_mm: 200.0,
            cylinder_mm: 180.0,
        }
    }
}

pub fn render_composite_objects(
    cfg: &CompositeObjectsScene,
    cam: &CameraGeometry,
    t: f32,
    out: &mut FrameF32,
) {
    let w = cam.width as f32;
    let h = cam.height as f32;
    let drift = 10.0 * (0.5 * t).sin();

    let box_x0 = 0.15 * w + drift;
    let box_x1 = 0.35 * w + drift;
    let box_y0 = 0.30 * h;
    let box_y1 = 0.70 * h;

    let cyl_cx = 0.65 * w;
    let cyl_r = 0.10 * w;

    for y in 0..cam.height {
        let row = out.row_mut(y);
        let fy = y as f32;
        for (x, slot) in row.iter_mut().enumerate() {
            let fx = x as f32;
            *slot = cfg.background_mm;
            if fx >= box_x0 && fx < box_x1 && fy >= box_y0 && fy < box_y1 {
                *slot = cfg.box_mm;
            }
            let dx = fx - cyl_cx;
            if dx.abs() < cyl_r && fy >= 0.2 * h && fy < 0.8 * h {
                // front surface of a vertical cylinder bulging toward the sensor
                *slot = cfg.cylinder_mm + cyl_r - (cyl_r * cyl_r - dx * dx).sqrt();
            }
        }
    }
}

/// Checkerboard alternating between two depths, for calibration checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationGridScene {
    pub cell_px: usize,
    pub depth_a_mm: f32,
    pub depth_b_mm: f32,
}

impl Default for CalibrationGridScene {
    fn default() -> Self {
        Self {
            cell_px: 40,
            depth_a_mm: 250.0,
            depth_b_mm: 350.0,
        }
    }
}

pub fn render_calibration_grid(
    cfg: &CalibrationGridScene,
    cam: &CameraGeometry,
    _t: f32,
    out: &mut FrameF32,
) {
    let cell = cfg.cell_px.max(1);
    for y in 0..cam.height {
        let row = out.row_mut(y);
        let cy = y / cell;
        for (x, slot) in row.iter_mut().enumerate() {
            let cx = x / cell;
            *slot = if (cx + cy) % 2 == 0 {
                cfg.depth_a_mm
            } else {
                cfg.depth_b_mm
            };
        }
    }
}

/// Parameter set for all six scenes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    pub moving_object: MovingObjectScene,
    pub surface_wave: SurfaceWaveScene,
    pub step_surface: StepSurfaceScene,
    pub noisy_data: NoisyDataScene,
    pub composite_objects: CompositeObjectsScene,
    pub calibration_grid: CalibrationGridScene,
}
