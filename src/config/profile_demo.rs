use crate::analyzer::AnalyzerParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ProfileDemoConfig {
    /// 16-bit grayscale PNG holding depth in millimeters.
    pub input: PathBuf,
    #[serde(default)]
    pub analyzer: AnalyzerParams,
    pub output: ProfileOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProfileOutputConfig {
    pub report_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<ProfileDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
