mod common;

use common::synthetic_frames::{flat_frame, sparse_frame};
use depth_profiler::filter::{filter_range, RangeFilterParams};
use depth_profiler::profile::{extract_profile, ProfileParams};

fn filtered(frame: &depth_profiler::frame::DepthFrame) -> depth_profiler::filter::FilteredFrame {
    let params = RangeFilterParams {
        smooth: false,
        ..Default::default()
    };
    filter_range(&frame.as_view(), &params)
}

#[test]
fn all_zero_frame_yields_extraction_failure() {
    let _ = env_logger::builder().is_test(true).try_init();
    let frame = depth_profiler::frame::DepthFrame::new(640, 480);
    let out = extract_profile(&filtered(&frame), &ProfileParams::default());
    let err = out.expect_err("all-invalid frame cannot yield a profile");
    assert_eq!(err.valid, 0);
}

#[test]
fn too_few_valid_columns_yield_extraction_failure() {
    // 15 valid columns of 640 is below the threshold of 20
    let frame = sparse_frame(640, 480, 15, 300);
    let out = extract_profile(&filtered(&frame), &ProfileParams::default());
    let err = out.expect_err("sparse frame cannot yield a profile");
    assert_eq!(err.valid, 15);
    assert!(err.required > 15);
}

#[test]
fn successful_extraction_is_fully_dense() {
    // 64 valid columns leave plenty of gaps to interpolate
    let frame = sparse_frame(640, 480, 64, 300);
    let profile =
        extract_profile(&filtered(&frame), &ProfileParams::default()).expect("enough samples");

    assert_eq!(profile.len(), 640);
    assert!(profile.values.iter().all(|v| v.is_finite()));
    assert_eq!(profile.valid_count, 64);
    assert!(profile.interpolated > 0);
    // constant input stays constant through interpolation and smoothing
    for &v in &profile.values {
        assert!((v - 300.0).abs() < 1e-2, "sample {v} drifted");
    }
}

#[test]
fn window_clipping_at_the_top_border_still_extracts() {
    let frame = flat_frame(640, 480, 250);
    let params = ProfileParams {
        line_index: 1,
        ..Default::default()
    };
    let profile = extract_profile(&filtered(&frame), &params).expect("band clipped, not failed");
    assert_eq!(profile.len(), 640);
    assert_eq!(profile.valid_count, 640);
}

#[test]
fn band_median_rejects_isolated_outliers() {
    let mut frame = flat_frame(640, 480, 300);
    // one hot row inside the band must not shift the median
    for x in 0..640 {
        frame.set(x, 242, 9000);
    }
    let params = RangeFilterParams {
        smooth: false,
        ..Default::default()
    };
    let filtered = filter_range(&frame.as_view(), &params);
    let profile = extract_profile(&filtered, &ProfileParams::default()).expect("profile");
    for &v in &profile.values {
        assert!((v - 300.0).abs() < 1.0, "outlier leaked into profile: {v}");
    }
}
