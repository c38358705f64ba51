use depth_profiler::scenario::{ScenarioGenerator, ScenarioKind};
use depth_profiler::{AnalyzerParams, SurfaceAnalyzer};

fn main() {
    // Demo stub: runs one synthetic frame through the analyzer
    let mut generator = ScenarioGenerator::new(ScenarioKind::StepSurface);
    generator.set_noise_level(0.0);
    generator.advance(1.0 / 30.0);
    let depth = generator.depth_frame();

    let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::near_field());
    let analysis = analyzer.process(depth.as_view());
    println!(
        "found={} valid={} high_curvature={} edges={} latency_ms={:.3}",
        analysis.result.profile_found,
        analysis.result.valid_samples,
        analysis.result.high_curvature_points,
        analysis.result.edge_pixels,
        analysis.result.latency_ms
    );
}
