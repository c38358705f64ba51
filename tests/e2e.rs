use depth_profiler::scenario::{ScenarioGenerator, ScenarioKind};
use depth_profiler::{AnalyzerParams, SurfaceAnalyzer};

fn quiet_generator(kind: ScenarioKind) -> ScenarioGenerator {
    let mut gen = ScenarioGenerator::new(kind);
    gen.set_noise_level(0.0);
    gen
}

#[test]
fn step_scene_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut gen = quiet_generator(ScenarioKind::StepSurface);
    gen.advance(1.0 / 30.0);
    let depth = gen.depth_frame();

    let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::near_field());
    let (analysis, report) = analyzer.process_with_diagnostics(depth.as_view());

    assert!(
        analysis.result.profile_found,
        "noise-free step scene must yield a profile, valid={}",
        analysis.result.valid_samples
    );
    let profile = analysis.profile.expect("profile present");
    assert_eq!(profile.len(), 640);
    assert!(profile.values.iter().all(|v| v.is_finite()));

    // the first depth discontinuity sits at a quarter of the width
    let curvature = analysis.curvature.expect("curvature present");
    let near_step = curvature
        .high
        .iter()
        .enumerate()
        .any(|(i, &flag)| flag && (i as i32 - 160).abs() <= 2);
    assert!(near_step, "no high-curvature flag near column 160");

    // step edges land in the near-field edge map
    let edges = analysis.edges.expect("edge stage enabled by default");
    assert_eq!(edges.w, 640);
    assert_eq!(edges.h, 480);
    assert!(analysis.result.edge_pixels > 0);

    assert_eq!(report.trace.input.width, 640);
    assert!(report.trace.timings.total_ms >= 0.0);
    assert!(report.trace.profile.as_ref().map(|p| p.found).unwrap_or(false));
}

#[test]
fn wave_scene_normals_are_unit_and_perpendicular() {
    let mut gen = quiet_generator(ScenarioKind::SurfaceWave);
    gen.advance(0.25);
    let depth = gen.depth_frame();

    let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::default());
    let analysis = analyzer.process(depth.as_view());
    let normals = analysis.normals.expect("normals present");
    assert_eq!(normals.len(), 640);
    for (n, t) in normals.normals.iter().zip(normals.tangents.iter()) {
        assert!((n.norm() - 1.0).abs() < 1e-5, "normal not unit: {n:?}");
        assert!((t.norm() - 1.0).abs() < 1e-5, "tangent not unit: {t:?}");
        assert!(n.dot(t).abs() < 1e-3, "normal not perpendicular: {n:?} {t:?}");
    }
}

#[test]
fn all_scenes_survive_heavy_noise() {
    let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::default());
    for kind in ScenarioKind::ALL {
        let mut gen = ScenarioGenerator::new(kind);
        gen.set_noise_level(1.0);
        for _ in 0..2 {
            gen.advance(1.0 / 30.0);
            let depth = gen.depth_frame();
            // success is not guaranteed under maximum noise, panics are the bug
            let analysis = analyzer.process(depth.as_view());
            assert_eq!(analysis.result.profile_found, analysis.profile.is_some());
        }
    }
}

#[test]
fn paused_generator_reproduces_the_same_analysis() {
    let mut gen = quiet_generator(ScenarioKind::CompositeObjects);
    gen.advance(0.5);
    gen.toggle_pause();

    let mut analyzer = SurfaceAnalyzer::new(AnalyzerParams::default());
    let first = analyzer.process(gen.depth_frame().as_view());
    gen.advance(3.0);
    let second = analyzer.process(gen.depth_frame().as_view());

    assert_eq!(
        first.profile.map(|p| p.values),
        second.profile.map(|p| p.values)
    );
}
