use depth_profiler::frame::DepthFrame;

/// Frame with every sample at the same depth.
pub fn flat_frame(width: usize, height: usize, depth_mm: u16) -> DepthFrame {
    let mut frame = DepthFrame::new(width, height);
    for v in &mut frame.data {
        *v = depth_mm;
    }
    frame
}

/// Frame whose depth ramps linearly along x: `z = base + slope * x`.
pub fn ramp_frame(width: usize, height: usize, base_mm: f32, slope: f32) -> DepthFrame {
    let mut frame = DepthFrame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            frame.set(x, y, (base_mm + slope * x as f32).round() as u16);
        }
    }
    frame
}

/// Frame with only `valid_columns` carrying a measurement on the profile
/// line; everything else is the zero sentinel.
pub fn sparse_frame(width: usize, height: usize, valid_columns: usize, depth_mm: u16) -> DepthFrame {
    let mut frame = DepthFrame::new(width, height);
    let step = width / valid_columns.max(1);
    for y in 0..height {
        for i in 0..valid_columns {
            frame.set(i * step, y, depth_mm);
        }
    }
    frame
}
