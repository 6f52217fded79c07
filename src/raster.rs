// src/raster.rs
//! Capture normalization: turns free-form stroke geometry into the canonical
//! 224x224 single-channel raster every sample in the dataset uses.
//!
//! Policy: padded-crop. The tight content box is padded by `PAD_MARGIN`,
//! rasterized on its own at `OVERSAMPLE` resolution, then aspect-fit into the
//! output square with a 10% visual border. This is a dataset-format contract:
//! samples produced under any other policy (e.g. a fixed full-canvas
//! downscale) are not interchangeable with these.
//!
//! The whole pipeline is a pure function of the input geometry. Identical
//! strokes yield byte-identical rasters; there is no randomness and no
//! environment input anywhere below.

use crate::core::types::{Rect, StrokeDrawing};
use crate::errors::CaptureError;
use image::{GrayImage, Luma};

/// Edge length of the canonical output raster.
pub const OUTPUT_SIZE: u32 = 224;

/// Margin (in capture units) added around the tight content box so stroke
/// edges are never clipped.
pub const PAD_MARGIN: f32 = 20.0;

/// Oversampling factor for the intermediate rasterization; keeps stroke
/// edges smooth after the final downscale.
pub const OVERSAMPLE: f32 = 3.0;

/// Fraction of the output square the content may occupy; the rest is border.
pub const FIT_MARGIN: f32 = 0.9;

const BACKGROUND: u8 = 255;

/// Hard cap on the intermediate buffer's edge length. Ink beyond the cap is
/// clipped; without it a drawing with extreme coordinate extents would
/// demand a multi-gigapixel buffer.
const MAX_REGION_PX: u32 = 4096;

/// Hard cap on stamps per segment; enough to cross the largest allowed
/// buffer twice at half-pixel steps.
const MAX_SEGMENT_STEPS: u32 = 16_384;

/// Renders a drawing into the canonical raster.
///
/// Fails with `EmptyCapture` when the drawing holds no ink; callers must not
/// persist anything for that input.
pub fn render_sample(drawing: &StrokeDrawing) -> Result<GrayImage, CaptureError> {
    let bounds = drawing.bounds().ok_or(CaptureError::EmptyCapture)?;
    let region = bounds.expanded(PAD_MARGIN);
    let ink = rasterize_region(drawing, &region);
    Ok(fit_to_canvas(&ink))
}

/// Ink coverage per pixel, 0.0 (paper) to 1.0 (full ink), at oversampled
/// resolution.
struct InkBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl InkBuffer {
    fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0.0; width as usize * height as usize] }
    }

    fn at(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Rasterizes only the padded content region, white background, soft-edged
/// stroke discs stamped along every segment. Coverage blends by max, so the
/// result does not depend on stroke order.
fn rasterize_region(drawing: &StrokeDrawing, region: &Rect) -> InkBuffer {
    let width = (region.width() * OVERSAMPLE).ceil().clamp(1.0, MAX_REGION_PX as f32) as u32;
    let height = (region.height() * OVERSAMPLE).ceil().clamp(1.0, MAX_REGION_PX as f32) as u32;
    let mut ink = InkBuffer::new(width, height);

    for stroke in &drawing.strokes {
        if stroke.points.is_empty() {
            continue;
        }
        let radius = (stroke.width.max(1.0) * OVERSAMPLE) / 2.0;
        let to_px = |x: f32, y: f32| {
            ((x - region.min_x) * OVERSAMPLE, (y - region.min_y) * OVERSAMPLE)
        };

        let (fx, fy) = to_px(stroke.points[0].x, stroke.points[0].y);
        stamp_disc(&mut ink, fx, fy, radius);
        for pair in stroke.points.windows(2) {
            let (ax, ay) = to_px(pair[0].x, pair[0].y);
            let (bx, by) = to_px(pair[1].x, pair[1].y);
            stamp_segment(&mut ink, ax, ay, bx, by, radius);
        }
    }
    ink
}

/// Walks a segment in half-pixel steps, stamping a disc at each step.
fn stamp_segment(ink: &mut InkBuffer, ax: f32, ay: f32, bx: f32, by: f32, radius: f32) {
    let (dx, dy) = (bx - ax, by - ay);
    let length = (dx * dx + dy * dy).sqrt();
    let steps = (length / 0.5).ceil().clamp(1.0, MAX_SEGMENT_STEPS as f32) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp_disc(ink, ax + dx * t, ay + dy * t, radius);
    }
}

/// Stamps one soft-edged disc: full coverage inside the radius, a one-pixel
/// antialiased falloff at the rim.
fn stamp_disc(ink: &mut InkBuffer, cx: f32, cy: f32, radius: f32) {
    let reach = radius + 1.0;
    let x0 = (cx - reach).floor().max(0.0) as u32;
    let y0 = (cy - reach).floor().max(0.0) as u32;
    let x1 = ((cx + reach).ceil() as u32).min(ink.width.saturating_sub(1));
    let y1 = ((cy + reach).ceil() as u32).min(ink.height.saturating_sub(1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (px, py) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
            let dist = (px * px + py * py).sqrt();
            let alpha = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if alpha > 0.0 {
                let idx = (y * ink.width + x) as usize;
                ink.data[idx] = ink.data[idx].max(alpha);
            }
        }
    }
}

/// Aspect-preserving fit of the oversampled region into the output square:
/// scale by `min(tw/sw, th/sh) * FIT_MARGIN`, center, fill the rest with
/// white, then quantize coverage to 8-bit grayscale.
fn fit_to_canvas(ink: &InkBuffer) -> GrayImage {
    let target = OUTPUT_SIZE as f32;
    let (sw, sh) = (ink.width as f32, ink.height as f32);
    let scale = (target / sw).min(target / sh) * FIT_MARGIN;
    let dw = ((sw * scale).round().max(1.0) as u32).min(OUTPUT_SIZE);
    let dh = ((sh * scale).round().max(1.0) as u32).min(OUTPUT_SIZE);
    let x0 = (OUTPUT_SIZE - dw) / 2;
    let y0 = (OUTPUT_SIZE - dh) / 2;

    let mut out = GrayImage::from_pixel(OUTPUT_SIZE, OUTPUT_SIZE, Luma([BACKGROUND]));
    for dy in 0..dh {
        let sy0 = dy as f32 / dh as f32 * sh;
        let sy1 = (dy + 1) as f32 / dh as f32 * sh;
        for dx in 0..dw {
            let sx0 = dx as f32 / dw as f32 * sw;
            let sx1 = (dx + 1) as f32 / dw as f32 * sw;
            let coverage = box_average(ink, sx0, sy0, sx1, sy1);
            let luma = (255.0 * (1.0 - coverage)).round().clamp(0.0, 255.0) as u8;
            out.put_pixel(x0 + dx, y0 + dy, Luma([luma]));
        }
    }
    out
}

/// Area-weighted average coverage over the source box [sx0,sx1) x [sy0,sy1).
fn box_average(ink: &InkBuffer, sx0: f32, sy0: f32, sx1: f32, sy1: f32) -> f32 {
    let ix0 = sx0.floor().max(0.0) as u32;
    let iy0 = sy0.floor().max(0.0) as u32;
    let ix1 = (sx1.ceil() as u32).min(ink.width);
    let iy1 = (sy1.ceil() as u32).min(ink.height);

    let mut sum = 0.0f32;
    let mut area = 0.0f32;
    for iy in iy0..iy1 {
        let wy = overlap(iy as f32, iy as f32 + 1.0, sy0, sy1);
        for ix in ix0..ix1 {
            let wx = overlap(ix as f32, ix as f32 + 1.0, sx0, sx1);
            let w = wx * wy;
            sum += ink.at(ix, iy) * w;
            area += w;
        }
    }
    if area > 0.0 {
        sum / area
    } else {
        0.0
    }
}

fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}
