use depth_profiler::config::edge_demo::{self, EdgeDemoConfig};
use depth_profiler::edges::detect_edges;
use depth_profiler::frame::io::{load_depth_png, save_edge_png, write_json_file};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeSummary {
    width: usize,
    height: usize,
    min_depth_mm: f32,
    max_depth_mm: f32,
    edge_pixels: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: EdgeDemoConfig = edge_demo::load_config(Path::new(&config_path))?;

    let depth = load_depth_png(&config.input)?;
    let edges = detect_edges(&depth.as_view(), &config.edge);

    let summary = EdgeSummary {
        width: edges.w,
        height: edges.h,
        min_depth_mm: config.edge.min_depth_mm,
        max_depth_mm: config.edge.max_depth_mm,
        edge_pixels: edges.count_edges(),
    };

    save_edge_png(&edges, &config.output.edge_png)?;
    write_json_file(&config.output.summary_json, &summary)?;

    println!(
        "Saved {} edge pixels to {}",
        summary.edge_pixels,
        config.output.edge_png.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: edge_demo <config.json>".to_string()
}
