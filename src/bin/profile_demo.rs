use depth_profiler::config::profile_demo::{self, ProfileDemoConfig};
use depth_profiler::frame::io::{load_depth_png, write_json_file};
use depth_profiler::SurfaceAnalyzer;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: ProfileDemoConfig = profile_demo::load_config(Path::new(&config_path))?;

    let depth = load_depth_png(&config.input)?;
    let mut analyzer = SurfaceAnalyzer::new(config.analyzer.clone());
    let (analysis, report) = analyzer.process_with_diagnostics(depth.as_view());

    write_json_file(&config.output.report_json, &report)?;

    match analysis.profile {
        Some(profile) => println!(
            "profile: {} positions ({} measured, {} interpolated), mean {:.1} mm",
            profile.len(),
            profile.valid_count,
            profile.interpolated,
            analysis.result.mean_depth_mm
        ),
        None => println!(
            "no usable profile ({} valid positions)",
            analysis.result.valid_samples
        ),
    }
    println!("report written to {}", config.output.report_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: profile_demo <config.json>".to_string()
}
