use depth_profiler::config::scenario_demo::{self, ScenarioDemoConfig};
use depth_profiler::frame::io::{save_color_png, save_depth_png, save_edge_png, write_json_file};
use depth_profiler::scenario::ScenarioGenerator;
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
    let config: ScenarioDemoConfig = scenario_demo::load_config(Path::new(&config_path))?;

    let mut generator = ScenarioGenerator::with_params(
        config.scenario,
        config.camera.clone(),
        config.simulation.clone(),
    );
    generator.set_scene_params(config.scenes.clone());
    generator.set_noise_level(config.noise_level);

    let mut analyzer = SurfaceAnalyzer::new(config.analyzer.clone());
    let range = (
        config.analyzer.filter.min_depth_mm,
        config.analyzer.filter.max_depth_mm,
    );

    let mut found = 0usize;
    for i in 0..config.frames {
        generator.advance(config.dt_s);
        let depth = generator.depth_frame();
        let (analysis, report) = analyzer.process_with_diagnostics(depth.as_view());
        if analysis.result.profile_found {
            found += 1;
        }

        let out = &config.output;
        if out.write_depth_png {
            let path = out.dir.join(format!("depth_{i:04}.png"));
            save_depth_png(&depth.as_view(), range.0, range.1, &path)?;
        }
        if out.write_color_png {
            let color = generator.color_frame();
            save_color_png(&color, &out.dir.join(format!("color_{i:04}.png")))?;
        }
        if out.write_edge_png {
            if let Some(ref edges) = analysis.edges {
                save_edge_png(edges, &out.dir.join(format!("edges_{i:04}.png")))?;
            }
        }
        if out.write_reports {
            write_json_file(&out.dir.join(format!("report_{i:04}.json")), &report)?;
        }

        println!(
            "frame {i}: found={} valid={} edges={} latency_ms={:.3}",
            analysis.result.profile_found,
            analysis.result.valid_samples,
            analysis.result.edge_pixels,
            analysis.result.latency_ms
        );
    }

    println!(
        "{}: {found}/{} frames produced a profile",
        generator.scenario().label(),
        config.frames
    );
    Ok(())
}

fn usage() -> String {
    "Usage: scenario_demo <config.json>".to_string()
}
