use crate::analyzer::AnalyzerParams;
use crate::scenario::{CameraGeometry, ScenarioKind, SceneParams, SimulationParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ScenarioDemoConfig {
    pub scenario: ScenarioKind,
    /// Number of frames to generate and analyze.
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Simulated seconds between frames.
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    #[serde(default)]
    pub noise_level: f32,
    #[serde(default)]
    pub camera: CameraGeometry,
    #[serde(default)]
    pub simulation: SimulationParams,
    #[serde(default)]
    pub scenes: SceneParams,
    #[serde(default)]
    pub analyzer: AnalyzerParams,
    pub output: ScenarioOutputConfig,
}

fn default_frames() -> usize {
    5
}

fn default_dt_s() -> f64 {
    1.0 / 30.0
}

#[derive(Debug, Deserialize)]
pub struct ScenarioOutputConfig {
    /// Directory receiving per-frame PNGs and reports.
    pub dir: PathBuf,
    #[serde(default)]
    pub write_depth_png: bool,
    #[serde(default)]
    pub write_color_png: bool,
    #[serde(default)]
    pub write_edge_png: bool,
    #[serde(default)]
    pub write_reports: bool,
}

pub fn load_config(path: &Path) -> Result<ScenarioDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
