mod common;

use common::synthetic_frames::{flat_frame, ramp_frame};
use depth_profiler::filter::{filter_range, RangeFilterParams};
use depth_profiler::normals::{
    estimate_normal_field, estimate_profile_normals, FieldParams, NormalParams,
};
use depth_profiler::profile::{extract_profile, ProfileParams};
use nalgebra::{Vector2, Vector3};

fn profile_of(frame: &depth_profiler::frame::DepthFrame) -> Vec<f32> {
    let params = RangeFilterParams {
        smooth: false,
        ..Default::default()
    };
    let filtered = filter_range(&frame.as_view(), &params);
    extract_profile(&filtered, &ProfileParams::default())
        .expect("synthetic frame yields a profile")
        .values
}

#[test]
fn flat_surface_normals_point_straight_up() {
    let values = profile_of(&flat_frame(640, 480, 300));
    let out = estimate_profile_normals(&values, &NormalParams::default());
    for n in &out.normals {
        assert!((n - Vector2::new(0.0, 1.0)).norm() < 1e-4, "normal {n:?}");
    }
}

#[test]
fn linear_ramp_normals_match_the_slope() {
    let values = profile_of(&ramp_frame(640, 480, 300.0, 0.5));
    let out = estimate_profile_normals(&values, &NormalParams::default());
    let expected = Vector2::new(-0.5f32, 1.0).normalize();
    // ignore border stencils and smoothing run-in
    for n in &out.normals[8..632] {
        assert!((n - expected).norm() < 0.02, "normal {n:?} != {expected:?}");
    }
}

#[test]
fn every_output_pair_is_unit_and_orthogonal() {
    let values = profile_of(&ramp_frame(640, 480, 250.0, -0.3));
    let out = estimate_profile_normals(&values, &NormalParams::default());
    assert_eq!(out.normals.len(), values.len());
    for (n, t) in out.normals.iter().zip(out.tangents.iter()) {
        assert!((n.norm() - 1.0).abs() < 1e-5);
        assert!((t.norm() - 1.0).abs() < 1e-5);
        assert!(n.dot(t).abs() < 1e-3);
    }
}

#[test]
fn normal_field_of_a_ramp_tilts_against_the_gradient() {
    let frame = ramp_frame(64, 48, 300.0, 2.0);
    let params = RangeFilterParams {
        smooth: false,
        ..Default::default()
    };
    let filtered = filter_range(&frame.as_view(), &params);
    let field = estimate_normal_field(&filtered, &FieldParams::default());

    let expected = Vector3::new(-2.0f32, 0.0, 1.0).normalize();
    let n = field.get(32, 24).expect("interior cell valid");
    assert!((n - expected).norm() < 0.05, "field normal {n:?}");
    for y in 0..48 {
        for x in 0..64 {
            if let Some(v) = field.get(x, y) {
                assert!((v.norm() - 1.0).abs() < 1e-5);
            }
        }
    }
}
