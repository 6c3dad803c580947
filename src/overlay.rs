use crate::renderer::{Renderer, rect_outline};
use crate::transform::Transform2D;
use crate::{Color, Rect};
use glam::DVec2;

/// Static screen-sized layer drawn over the scene: no shake, no camera, no
/// viewport. Suits HUDs, fades and transitions.
pub struct Overlay<R: Renderer> {
    width: u32,
    height: u32,
    surface: R::Surface,
    auto_scaling: bool,
}

impl<R: Renderer> Overlay<R> {
    pub fn new(renderer: &mut R, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            surface: renderer.create_surface(width, height),
            auto_scaling: true,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn surface(&self) -> &R::Surface {
        &self.surface
    }

    pub fn set_auto_scaling(&mut self, auto_scaling: bool) {
        self.auto_scaling = auto_scaling;
    }

    pub fn render(&mut self, renderer: &mut R, target: &mut R::Surface) {
        let mut m = Transform2D::new();
        let (tw, th) = renderer.surface_size(target);
        if self.auto_scaling && (tw, th) != (self.width, self.height) {
            m.scale(
                f64::from(tw) / f64::from(self.width),
                f64::from(th) / f64::from(self.height),
            );
        }
        renderer.present(target, &self.surface, &m);
    }

    pub fn fill(&mut self, renderer: &mut R, color: Color) {
        renderer.fill(&mut self.surface, color);
    }

    pub fn draw_image(&mut self, renderer: &mut R, image: &R::Surface, transform: &Transform2D) {
        renderer.draw_image(&mut self.surface, image, transform);
    }

    pub fn draw_line(&mut self, renderer: &mut R, from: DVec2, to: DVec2, color: Color) {
        renderer.draw_line(&mut self.surface, from, to, color);
    }

    pub fn draw_rect(&mut self, renderer: &mut R, rect: Rect, solid: bool, color: Color) {
        if solid {
            renderer.fill_rect(&mut self.surface, rect, color);
        } else {
            for (from, to) in rect_outline(rect) {
                renderer.draw_line(&mut self.surface, from, to, color);
            }
        }
    }

    pub fn debug_print_at(&mut self, renderer: &mut R, text: &str, at: DVec2) {
        renderer.draw_text(&mut self.surface, text, at, Color::WHITE);
    }
}
