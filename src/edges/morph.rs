//! Minimal binary morphology on edge maps.
//!
//! Pixels are binary with threshold `> 0`; outputs are `0` or `1`.
//! A 3×3 closing (dilate, then erode) merges fragmented edge responses
//! into contiguous boundaries.
use super::EdgeMap;

pub fn dilate3x3(src: &EdgeMap) -> EdgeMap {
    let mut out = EdgeMap::new(src.w, src.h);
    if src.w == 0 || src.h == 0 {
        return out;
    }
    for y in 0..src.h {
        for x in 0..src.w {
            let mut any_set = false;
            'scan: for dy in -1isize..=1 {
                let ny = y as isize + dy;
                if ny < 0 || ny >= src.h as isize {
                    continue;
                }
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    if nx < 0 || nx >= src.w as isize {
                        continue;
                    }
                    if src.get(nx as usize, ny as usize) != 0 {
                        any_set = true;
                        break 'scan;
                    }
                }
            }
            if any_set {
                out.set(x, y, 1);
            }
        }
    }
    out
}

pub fn erode3x3(src: &EdgeMap) -> EdgeMap {
    let mut out = EdgeMap::new(src.w, src.h);
    if src.w == 0 || src.h == 0 {
        return out;
    }
    for y in 0..src.h {
        for x in 0..src.w {
            let mut all_set = true;
            'scan: for dy in -1isize..=1 {
                let ny = y as isize + dy;
                if ny < 0 || ny >= src.h as isize {
                    all_set = false;
                    break;
                }
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    if nx < 0 || nx >= src.w as isize {
                        all_set = false;
                        break 'scan;
                    }
                    if src.get(nx as usize, ny as usize) == 0 {
                        all_set = false;
                        break 'scan;
                    }
                }
            }
            if all_set {
                out.set(x, y, 1);
            }
        }
    }
    out
}

/// Morphological closing: dilation followed by erosion.
pub fn close3x3(src: &EdgeMap) -> EdgeMap {
    erode3x3(&dilate3x3(src))
}
