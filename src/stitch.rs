//! The seam-blending compositor.
//!
//! [`compose`] splices equal-sized frames left to right, cross-fading
//! `blend_width` columns at each junction under a shared [`GradientMask`].
//! [`overlay`] is the non-blending variant: plain source-over of every frame
//! onto the first. Both leave their inputs untouched and are fully
//! deterministic.

use crate::{
    composite,
    core::Frame,
    error::{PanoError, PanoResult},
    mask::GradientMask,
};

/// Clamp a requested blend width into `[0, image_width]`.
pub fn clamp_blend_width(requested: i64, image_width: u32) -> u32 {
    requested.clamp(0, i64::from(image_width)) as u32
}

/// Output width for `image_count` images of `image_width` columns joined
/// with `blend_width` overlapping columns at each junction.
///
/// The first image contributes `image_width` columns and each subsequent
/// image `image_width - blend_width` new ones; the result never drops below
/// a single image's width.
pub fn stitched_width(image_count: u32, image_width: u32, blend_width: u32) -> u32 {
    let blend = blend_width.min(image_width);
    match image_count {
        0 => 0,
        1 => image_width,
        n => {
            let total = u64::from(image_width)
                + u64::from(n - 1) * u64::from(image_width - blend);
            total.clamp(u64::from(image_width), u64::from(u32::MAX)) as u32
        }
    }
}

/// Stitch `frames` left to right into one panorama, cross-fading
/// `blend_width` columns at each junction.
///
/// All frames must share one size; `blend_width` is clamped to the frame
/// width. With `blend_width == 0` (or a single frame) no mask is built and
/// images are pasted unmodified. Columns outside the junction strips
/// reproduce their source frame byte-for-byte.
pub fn compose(frames: &[Frame], blend_width: u32) -> PanoResult<Frame> {
    let first = frames.first().ok_or_else(|| {
        PanoError::invalid_configuration("compose requires at least one input image")
    })?;
    let width = first.width;
    let height = first.height;
    ensure_uniform(frames, width, height)?;

    let blend = blend_width.min(width);
    let total = stitched_width(frames.len() as u32, width, blend);
    let mut canvas = Frame::transparent(total, height);

    let mask = if blend > 0 && frames.len() > 1 {
        Some(GradientMask::linear(blend)?)
    } else {
        None
    };

    // Canvas column at which the next image's leading edge would land if
    // pasted with no overlap.
    let mut cursor = 0u32;
    for (index, frame) in frames.iter().enumerate() {
        if index == 0 {
            canvas.paste_columns(0, frame, 0, width)?;
            cursor = width;
            continue;
        }

        // The junction starts `blend` columns inside the previous image.
        let start = cursor - blend;
        match &mask {
            Some(mask) => {
                blend_junction(&mut canvas, frame, start, mask)?;
                if width > blend {
                    canvas.paste_columns(start + blend, frame, blend, width - blend)?;
                }
            }
            None => canvas.paste_columns(start, frame, 0, width)?,
        }
        cursor = start + width;
    }

    Ok(canvas)
}

/// Cross-fade the canvas strip `[start, start + mask.width())` against the
/// incoming frame's leading strip and paste the result back.
fn blend_junction(
    canvas: &mut Frame,
    incoming: &Frame,
    start: u32,
    mask: &GradientMask,
) -> PanoResult<()> {
    let blend = mask.width();
    let mut strip = canvas.column_strip(start, blend)?;
    let leading = incoming.column_strip(0, blend)?;
    composite::lerp_strip_in_place(&mut strip.data, &leading.data, mask.weights())?;
    canvas.paste_columns(start, &strip, 0, blend)
}

/// Source-over every frame onto the first, in order, with no cross-fade.
///
/// The output has a single frame's size; later frames win wherever they are
/// opaque.
pub fn overlay(frames: &[Frame]) -> PanoResult<Frame> {
    let first = frames.first().ok_or_else(|| {
        PanoError::invalid_configuration("overlay requires at least one input image")
    })?;
    ensure_uniform(frames, first.width, first.height)?;

    let mut out = first.clone();
    for frame in &frames[1..] {
        composite::over_in_place(&mut out.data, &frame.data)?;
    }
    Ok(out)
}

fn ensure_uniform(frames: &[Frame], width: u32, height: u32) -> PanoResult<()> {
    for (index, frame) in frames.iter().enumerate() {
        if frame.width != width || frame.height != height {
            return Err(PanoError::dimension_mismatch(format!(
                "image #{index} is {}x{}, expected {width}x{height}",
                frame.width, frame.height
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: [u8; 4]) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&px);
        }
        Frame::from_rgba8(width, height, data).unwrap()
    }

    #[test]
    fn width_formula_matches_overlap_geometry() {
        assert_eq!(stitched_width(0, 100, 20), 0);
        assert_eq!(stitched_width(1, 100, 20), 100);
        assert_eq!(stitched_width(3, 100, 20), 260);
        assert_eq!(stitched_width(3, 100, 0), 300);
        assert_eq!(stitched_width(5, 100, 100), 100);
    }

    #[test]
    fn oversized_blend_request_clamps_to_image_width() {
        assert_eq!(clamp_blend_width(5000, 960), 960);
        assert_eq!(clamp_blend_width(-7, 960), 0);
        assert_eq!(clamp_blend_width(50, 960), 50);
        assert_eq!(stitched_width(2, 960, clamp_blend_width(5000, 960)), 960);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = compose(&[], 20).unwrap_err();
        assert!(matches!(err, PanoError::InvalidConfiguration(_)));

        let err = overlay(&[]).unwrap_err();
        assert!(matches!(err, PanoError::InvalidConfiguration(_)));
    }

    #[test]
    fn mismatched_sizes_are_rejected_with_index() {
        let a = solid(4, 2, [255, 0, 0, 255]);
        let b = solid(4, 3, [0, 255, 0, 255]);
        let err = compose(&[a, b], 1).unwrap_err();
        match err {
            PanoError::DimensionMismatch(msg) => assert!(msg.contains("#1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_image_is_returned_unchanged() {
        let a = solid(5, 3, [7, 8, 9, 255]);
        let out = compose(std::slice::from_ref(&a), 2).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn zero_blend_abuts_images_without_fading() {
        let a = solid(3, 2, [255, 0, 0, 255]);
        let b = solid(3, 2, [0, 255, 0, 255]);
        let out = compose(&[a.clone(), b.clone()], 0).unwrap();

        assert_eq!(out.width, 6);
        for x in 0..3 {
            assert_eq!(out.pixel(x, 0), [255, 0, 0, 255]);
            assert_eq!(out.pixel(x + 3, 1), [0, 255, 0, 255]);
        }
    }

    #[test]
    fn full_width_blend_crossfades_entire_image() {
        let a = solid(4, 2, [200, 0, 0, 255]);
        let b = solid(4, 2, [0, 200, 0, 255]);
        let out = compose(&[a.clone(), b.clone()], 4).unwrap();

        assert_eq!(out.width, 4);
        assert_eq!(out.pixel(0, 0), a.pixel(0, 0));
        assert_eq!(out.pixel(3, 0), b.pixel(3, 0));
        let mid = out.pixel(1, 0);
        assert!(mid[0] > 0 && mid[0] < 200);
        assert!(mid[1] > 0 && mid[1] < 200);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = solid(4, 2, [255, 0, 0, 255]);
        let b = solid(4, 2, [0, 0, 255, 255]);
        let frames = vec![a.clone(), b.clone()];
        compose(&frames, 2).unwrap();
        assert_eq!(frames[0], a);
        assert_eq!(frames[1], b);
    }

    #[test]
    fn overlay_keeps_single_frame_geometry() {
        let a = solid(4, 2, [255, 0, 0, 255]);
        let b = solid(4, 2, [0, 255, 0, 255]);
        let out = overlay(&[a, b.clone()]).unwrap();
        assert_eq!(out, b);
    }

    #[test]
    fn overlay_transparent_top_keeps_base() {
        let a = solid(4, 2, [255, 0, 0, 255]);
        let b = solid(4, 2, [0, 0, 0, 0]);
        let out = overlay(&[a.clone(), b]).unwrap();
        assert_eq!(out, a);
    }
}
