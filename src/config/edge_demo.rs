use crate::edges::EdgeParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EdgeDemoConfig {
    /// 16-bit grayscale PNG holding depth in millimeters.
    pub input: PathBuf,
    #[serde(default)]
    pub edge: EdgeParams,
    pub output: EdgeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct EdgeOutputConfig {
    pub edge_png: PathBuf,
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<EdgeDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
