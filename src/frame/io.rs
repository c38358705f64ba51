//! I/O helpers for depth frames and JSON reports.
//!
//! - `load_depth_png`: read a 16-bit grayscale PNG into a `DepthFrame`.
//! - `save_depth_png`: write a depth frame as a normalized 8-bit gray PNG.
//! - `save_edge_png`: write a binary edge map as a black/white PNG.
//! - `save_color_png`: write a `ColorFrame` as an RGB PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! These exist for the demo binaries and test tooling; the pipeline itself
//! never touches the filesystem.
use super::{ColorFrame, DepthFrame, DepthView, FrameView};
use crate::edges::EdgeMap;
use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a 16-bit grayscale PNG as a depth frame (sample values are
/// interpreted as millimeters, `0` = no measurement).
pub fn load_depth_png(path: &Path) -> Result<DepthFrame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma16();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(DepthFrame::from_vec(width, height, data))
}

/// Save a depth view as an 8-bit grayscale PNG, mapping `[min_mm, max_mm]`
/// linearly to 0–255. Invalid (zero) samples render black.
pub fn save_depth_png(
    depth: &DepthView<'_>,
    min_mm: f32,
    max_mm: f32,
    path: &Path,
) -> Result<(), String> {
    assert!(max_mm > min_mm, "max_mm must exceed min_mm");
    ensure_parent_dir(path)?;
    let span = max_mm - min_mm;
    let mut out = GrayImage::new(depth.w as u32, depth.h as u32);
    for y in 0..depth.h {
        let row = depth.row(y);
        for (x, &mm) in row.iter().enumerate() {
            let v = if mm == 0 {
                0.0
            } else {
                ((mm as f32 - min_mm) / span * 255.0).clamp(0.0, 255.0)
            };
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary edge map as a black/white PNG.
pub fn save_edge_png(edges: &EdgeMap, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(edges.w as u32, edges.h as u32);
    for y in 0..edges.h {
        for x in 0..edges.w {
            let v = if edges.get(x, y) != 0 { 255 } else { 0 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a color frame as an RGB PNG.
pub fn save_color_png(frame: &ColorFrame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(frame.w as u32, frame.h as u32);
    for y in 0..frame.h {
        for x in 0..frame.w {
            out.put_pixel(x as u32, y as u32, Rgb(frame.get(x, y)));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
