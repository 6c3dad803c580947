use super::{Renderer, clip_segment, line_points, transformed_bounds};
use crate::transform::Transform2D;
use crate::{Color, Rect};
use glam::{DVec2, dvec2};
use image::{Rgba, RgbaImage};

/// A piece of text handed to the raster backend.
///
/// Glyph rasterization is left to the host; labels are kept so it (or a test)
/// can draw or inspect them.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: DVec2,
    pub color: Color,
}

/// CPU renderer drawing into `image::RgbaImage` surfaces.
///
/// Blits use inverse mapping with nearest-neighbour sampling and source-over
/// blending. Degenerate (non-invertible) blit transforms draw nothing.
#[derive(Debug, Default)]
pub struct RasterRenderer {
    labels: Vec<TextLabel>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Returns and clears the text labels collected since the last call.
    pub fn take_labels(&mut self) -> Vec<TextLabel> {
        std::mem::take(&mut self.labels)
    }
}

fn blend(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = f32::from(src[3]) / 255.0;
    if sa <= 0.0 {
        return;
    }
    if sa >= 1.0 {
        dst.0 = src;
        return;
    }
    let da = f32::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let s = f32::from(src[i]) / 255.0;
        let d = f32::from(dst.0[i]) / 255.0;
        let c = (s * sa + d * da * (1.0 - sa)) / out_a;
        dst.0[i] = (c * 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

fn put(target: &mut RgbaImage, x: i64, y: i64, src: [u8; 4]) {
    if x < 0 || y < 0 || x >= i64::from(target.width()) || y >= i64::from(target.height()) {
        return;
    }
    blend(target.get_pixel_mut(x as u32, y as u32), src);
}

impl Renderer for RasterRenderer {
    type Surface = RgbaImage;

    fn create_surface(&mut self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    fn surface_size(&self, surface: &RgbaImage) -> (u32, u32) {
        surface.dimensions()
    }

    fn fill(&mut self, target: &mut RgbaImage, color: Color) {
        let rgba = color.to_rgba8();
        let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut **target);
        pixels.fill(rgba);
    }

    fn draw_image(&mut self, target: &mut RgbaImage, image: &RgbaImage, transform: &Transform2D) {
        let Some(inverse) = transform.inverse() else {
            tracing::trace!("skipping blit through singular transform");
            return;
        };
        let (src_w, src_h) = image.dimensions();
        let (dst_w, dst_h) = target.dimensions();
        if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
            return;
        }

        let (min, max) = transformed_bounds(transform, f64::from(src_w), f64::from(src_h));
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = max.x.ceil().min(f64::from(dst_w)) as u32;
        let y1 = max.y.ceil().min(f64::from(dst_h)) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let src = inverse.apply(dvec2(f64::from(x) + 0.5, f64::from(y) + 0.5));
                if src.x < 0.0 || src.y < 0.0 {
                    continue;
                }
                let (sx, sy) = (src.x.floor() as u32, src.y.floor() as u32);
                if sx >= src_w || sy >= src_h {
                    continue;
                }
                let pixel = image.get_pixel(sx, sy).0;
                blend(target.get_pixel_mut(x, y), pixel);
            }
        }
    }

    fn draw_line(&mut self, target: &mut RgbaImage, from: DVec2, to: DVec2, color: Color) {
        if !(from.is_finite() && to.is_finite()) {
            return;
        }
        let (w, h) = target.dimensions();
        let Some((from, to)) = clip_segment(from, to, DVec2::ZERO, dvec2(f64::from(w), f64::from(h)))
        else {
            return;
        };
        let rgba = color.to_rgba8();
        let points = line_points(
            from.x.floor() as i64,
            from.y.floor() as i64,
            to.x.floor() as i64,
            to.y.floor() as i64,
        );
        for (x, y) in points {
            put(target, x, y, rgba);
        }
    }

    fn fill_rect(&mut self, target: &mut RgbaImage, rect: Rect, color: Color) {
        let rgba = color.to_rgba8();
        let (w, h) = target.dimensions();
        let x0 = rect.x.floor().max(0.0);
        let y0 = rect.y.floor().max(0.0);
        let x1 = (rect.x + rect.w).floor().min(f64::from(w));
        let y1 = (rect.y + rect.h).floor().min(f64::from(h));
        if !(x0 < x1 && y0 < y1) {
            return;
        }
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                blend(target.get_pixel_mut(x, y), rgba);
            }
        }
    }

    fn draw_text(&mut self, _target: &mut RgbaImage, text: &str, at: DVec2, color: Color) {
        tracing::trace!(text, x = at.x, y = at.y, "text label");
        self.labels.push(TextLabel {
            text: text.to_owned(),
            position: at,
            color,
        });
    }
}
