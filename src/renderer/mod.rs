use crate::transform::Transform2D;
use crate::{Color, Rect};
use glam::DVec2;

mod geometry;
mod raster;
mod recorder;

pub use raster::{RasterRenderer, TextLabel};
pub use recorder::{DrawCommand, Recorder, SurfaceId};

// Re-export internal geometry helpers for use by unit tests and other crate modules.
pub(crate) use geometry::{clip_segment, line_points, rect_outline, transformed_bounds};

/// Backend that owns the actual pixels.
///
/// The compositor never touches pixels itself: it builds transforms and
/// forwards draw calls here. All coordinates are in the target surface's
/// pixel space; any camera or padding offset has already been applied.
pub trait Renderer {
    /// An off-screen image that can be drawn into and drawn from.
    type Surface;

    fn create_surface(&mut self, width: u32, height: u32) -> Self::Surface;

    fn surface_size(&self, surface: &Self::Surface) -> (u32, u32);

    /// Replace every pixel of `target` with `color`.
    fn fill(&mut self, target: &mut Self::Surface, color: Color);

    /// Draw `image` onto `target`, mapping image pixel space through `transform`.
    fn draw_image(
        &mut self,
        target: &mut Self::Surface,
        image: &Self::Surface,
        transform: &Transform2D,
    );

    fn draw_line(&mut self, target: &mut Self::Surface, from: DVec2, to: DVec2, color: Color);

    fn fill_rect(&mut self, target: &mut Self::Surface, rect: Rect, color: Color);

    fn draw_text(&mut self, target: &mut Self::Surface, text: &str, at: DVec2, color: Color);

    /// Final blit of a composed scene onto the output surface.
    fn present(
        &mut self,
        target: &mut Self::Surface,
        source: &Self::Surface,
        transform: &Transform2D,
    ) {
        self.draw_image(target, source, transform);
    }
}
