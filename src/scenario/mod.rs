//! Synthetic depth/color frame source for hardware-free operation.
//!
//! Six canned scenes exercise different aspects of the pipeline: object
//! tracking, continuous surfaces, depth discontinuities, noise robustness,
//! composite shapes and calibration patterns. Each scene's base signal is
//! a pure function of simulated elapsed time, so frames are reproducible;
//! Gaussian noise and dropout, scaled by a 0..1 noise level, come from a
//! seeded RNG owned by the generator.
//!
//! The generator is a small state machine (scenario × paused/running)
//! driven through its mutators by a single control loop. It is constructed
//! explicitly and owned by the caller; there is no shared global instance.
//!
//! Modules
//! - [`scenes`] – the six deterministic base signals and their parameters.
//! - [`noise`] – Gaussian noise and dropout helpers.
use crate::frame::{ColorFrame, DepthFrame, FrameF32};
use log::debug;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

pub mod noise;
pub mod scenes;

pub use scenes::SceneParams;

/// Scene selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    MovingObject,
    SurfaceWave,
    StepSurface,
    NoisyData,
    CompositeObjects,
    CalibrationGrid,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::MovingObject,
        ScenarioKind::SurfaceWave,
        ScenarioKind::StepSurface,
        ScenarioKind::NoisyData,
        ScenarioKind::CompositeObjects,
        ScenarioKind::CalibrationGrid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MovingObject => "moving_object",
            Self::SurfaceWave => "surface_wave",
            Self::StepSurface => "step_surface",
            Self::NoisyData => "noisy_data",
            Self::CompositeObjects => "composite_objects",
            Self::CalibrationGrid => "calibration_grid",
        }
    }

    /// The scene following this one in auto-cycle order.
    pub fn next(&self) -> ScenarioKind {
        let idx = Self::ALL.iter().position(|k| k == self).expect("member");
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Geometry and admissible range of the simulated camera.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraGeometry {
    pub width: usize,
    pub height: usize,
    pub min_depth_mm: f32,
    pub max_depth_mm: f32,
}

impl Default for CameraGeometry {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            min_depth_mm: 100.0,
            max_depth_mm: 500.0,
        }
    }
}

/// Simulation driving parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Multiplier applied to wall-clock deltas fed to [`ScenarioGenerator::advance`].
    pub speed: f32,
    /// Cycle through all scenes automatically.
    pub auto_cycle: bool,
    /// Seconds of simulated time per scene when auto-cycling.
    pub cycle_interval_s: f64,
    /// RNG seed for noise and dropout.
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            auto_cycle: false,
            cycle_interval_s: 10.0,
            seed: 0x5eed,
        }
    }
}

/// Full-scale noise standard deviation: a noise level of 1.0 adds Gaussian
/// noise with this sigma.
const NOISE_SIGMA_FULL_SCALE_MM: f32 = 100.0;

/// RGB marker painted into the color frame where depth left the admissible
/// range (tunable; some rig revisions used BGR ordering).
const OUT_OF_RANGE_RGB: [u8; 3] = [255, 0, 0];

/// Stateful synthetic frame source.
pub struct ScenarioGenerator {
    kind: ScenarioKind,
    camera: CameraGeometry,
    scenes: SceneParams,
    noise_level: f32,
    speed: f32,
    paused: bool,
    auto_cycle: bool,
    cycle_interval_s: f64,
    elapsed_s: f64,
    cycle_elapsed_s: f64,
    frame_count: u64,
    rng: Pcg64,
    scratch: FrameF32,
}

impl ScenarioGenerator {
    /// Generator with default camera geometry and simulation parameters.
    pub fn new(kind: ScenarioKind) -> Self {
        Self::with_params(kind, CameraGeometry::default(), SimulationParams::default())
    }

    pub fn with_params(
        kind: ScenarioKind,
        camera: CameraGeometry,
        sim: SimulationParams,
    ) -> Self {
        let scratch = FrameF32::new(camera.width, camera.height);
        Self {
            kind,
            camera,
            scenes: SceneParams::default(),
            noise_level: 0.05,
            speed: sim.speed,
            paused: false,
            auto_cycle: sim.auto_cycle,
            cycle_interval_s: sim.cycle_interval_s,
            elapsed_s: 0.0,
            cycle_elapsed_s: 0.0,
            frame_count: 0,
            rng: Pcg64::seed_from_u64(sim.seed),
            scratch,
        }
    }

    /// Override the per-scene parameters.
    pub fn set_scene_params(&mut self, scenes: SceneParams) {
        self.scenes = scenes;
    }

    pub fn scenario(&self) -> ScenarioKind {
        self.kind
    }

    pub fn set_scenario(&mut self, kind: ScenarioKind) {
        if kind != self.kind {
            debug!("scenario switch {} -> {}", self.kind.label(), kind.label());
        }
        self.kind = kind;
        self.cycle_elapsed_s = 0.0;
    }

    pub fn noise_level(&self) -> f32 {
        self.noise_level
    }

    /// Set the noise level, clamped to 0..1.
    pub fn set_noise_level(&mut self, level: f32) {
        self.noise_level = level.clamp(0.0, 1.0);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(
            "scenario {} {}",
            self.kind.label(),
            if self.paused { "paused" } else { "running" }
        );
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn camera(&self) -> &CameraGeometry {
        &self.camera
    }

    /// Advance simulated time by a wall-clock delta. Frozen while paused;
    /// scaled by the speed multiplier; drives scene auto-cycling.
    pub fn advance(&mut self, dt_s: f64) {
        if self.paused {
            return;
        }
        let scaled = dt_s * self.speed as f64;
        self.elapsed_s += scaled;
        if self.auto_cycle {
            self.cycle_elapsed_s += scaled;
            if self.cycle_elapsed_s >= self.cycle_interval_s {
                self.cycle_elapsed_s -= self.cycle_interval_s;
                let next = self.kind.next();
                debug!("auto-cycle {} -> {}", self.kind.label(), next.label());
                self.kind = next;
            }
        }
    }

    /// Render the depth frame for the current simulated time.
    ///
    /// With noise level 0 the output is a pure function of the scenario and
    /// elapsed time; otherwise seeded Gaussian noise (and, for the noisy
    /// scene, dropout) is layered on top before clipping to the camera's
    /// valid range and casting to u16.
    pub fn depth_frame(&mut self) -> DepthFrame {
        let t = self.elapsed_s as f32;
        self.scratch.reset(self.camera.width, self.camera.height);
        self.render_base(t);

        if self.noise_level > 0.0 {
            let sigma = self.noise_level * NOISE_SIGMA_FULL_SCALE_MM;
            noise::add_gaussian_noise(&mut self.rng, &mut self.scratch, sigma);
        }

        let mut frame = DepthFrame::new(self.camera.width, self.camera.height);
        for (dst, &src) in frame.data.iter_mut().zip(self.scratch.data.iter()) {
            let clipped = src.clamp(self.camera.min_depth_mm, self.camera.max_depth_mm);
            *dst = clipped as u16;
        }

        if self.noise_level > 0.0 && self.kind == ScenarioKind::NoisyData {
            noise::apply_dropout(
                &mut self.rng,
                &mut frame,
                self.scenes.noisy_data.invalid_rate,
            );
        }

        self.frame_count += 1;
        frame
    }

    /// Render the companion RGB frame: a horizontal gradient with the
    /// out-of-range marker painted where the base signal left the camera's
    /// admissible range.
    pub fn color_frame(&mut self) -> ColorFrame {
        let t = self.elapsed_s as f32;
        self.scratch.reset(self.camera.width, self.camera.height);
        self.render_base(t);

        let mut frame = ColorFrame::new(self.camera.width, self.camera.height);
        let w = self.camera.width.max(2);
        for y in 0..self.camera.height {
            for x in 0..self.camera.width {
                let shade = (x * 255 / (w - 1)) as u8;
                let z = self.scratch.get(x, y);
                let rgb = if z < self.camera.min_depth_mm || z > self.camera.max_depth_mm {
                    OUT_OF_RANGE_RGB
                } else {
                    [shade, shade, 255 - shade]
                };
                frame.set(x, y, rgb);
            }
        }
        frame
    }

    fn render_base(&mut self, t: f32) {
        match self.kind {
            ScenarioKind::MovingObject => {
                scenes::render_moving_object(
                    &self.scenes.moving_object,
                    &self.camera,
                    t,
                    &mut self.scratch,
                );
            }
            ScenarioKind::SurfaceWave => {
                scenes::render_surface_wave(
                    &self.scenes.surface_wave,
                    &self.camera,
                    t,
                    &mut self.scratch,
                );
            }
            ScenarioKind::StepSurface => {
                scenes::render_step_surface(
                    &self.scenes.step_surface,
                    &self.camera,
                    t,
                    &mut self.scratch,
                );
            }
            ScenarioKind::NoisyData => {
                scenes::render_noisy_data(
                    &self.scenes.noisy_data,
                    &self.camera,
                    t,
                    &mut self.scratch,
                );
            }
            ScenarioKind::CompositeObjects => {
                scenes::render_composite_objects(
                    &self.scenes.composite_objects,
                    &self.camera,
                    t,
                    &mut self.scratch,
                );
            }
            ScenarioKind::CalibrationGrid => {
                scenes::render_calibration_grid(
                    &self.scenes.calibration_grid,
                    &self.camera,
                    t,
                    &mut self.scratch,
                );
            }
        }
    }
}
