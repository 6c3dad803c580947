// Debug overlays. Areas are drawn onto the scene surface before the blit,
// frame stats onto the final target after it.

use super::Screen;
use crate::renderer::{Renderer, rect_outline};
use crate::{Color, Rect};
use glam::{DVec2, dvec2};

const VIEWPORT_COLOR: Color = Color::rgba8(255, 0, 0, 255);
const INITIAL_VIEWPORT_COLOR: Color = Color::rgba8(0, 255, 0, 255);
const FIXED_VIEW_COLOR: Color = Color::rgba8(0, 64, 135, 255);
const FOCUS_COLOR: Color = Color::rgba8(0, 0, 255, 255);

impl<R: Renderer> Screen<R> {
    pub(super) fn draw_debug_areas(&mut self, renderer: &mut R) {
        // Subtracting the camera offset cancels the one draw_line adds, so
        // these areas stay put on screen while the camera moves.
        let camera_offset = self.camera.as_ref().map_or(DVec2::ZERO, |c| c.offset());
        let (w, h) = (
            f64::from(self.screen_size.0),
            f64::from(self.screen_size.1),
        );

        match self.viewport.as_ref().map(|v| (v.position(), v.initial_position())) {
            Some((position, initial)) => {
                let current = position - camera_offset;
                self.outline(renderer, Rect::new(current.x, current.y, w, h), VIEWPORT_COLOR);
                let initial = initial - camera_offset;
                self.outline(
                    renderer,
                    Rect::new(initial.x, initial.y, w, h),
                    INITIAL_VIEWPORT_COLOR,
                );
            }
            None => {
                let origin = -camera_offset;
                self.outline(renderer, Rect::new(origin.x, origin.y, w, h), FIXED_VIEW_COLOR);
            }
        }

        let focus = self
            .camera
            .as_ref()
            .filter(|c| c.is_debug())
            .map(|c| (c.position(), c.focus_rect()));
        if let Some((position, focus_rect)) = focus {
            self.debug_print_at(
                renderer,
                &format!("Camera-X: {:.2} Camera-Y: {:.2}", position.x, position.y),
                dvec2(0.0, 32.0),
            );
            self.outline(renderer, focus_rect, FOCUS_COLOR);
        }
    }

    pub(super) fn draw_debug_text(
        &mut self,
        renderer: &mut R,
        target: &mut R::Surface,
        target_size: (u32, u32),
    ) {
        if self.last_dt > 0.0 {
            let tps = format!("TPS: {:.2}", 1.0 / self.last_dt);
            renderer.draw_text(target, &tps, DVec2::ZERO, Color::WHITE);
        }

        let Some(viewport) = self.viewport.as_ref() else {
            return;
        };
        let mut lines = viewport.to_string();
        // Skipped while the inverse is undefined.
        if let Some(world) = self.cursor.and_then(|c| self.screen_to_world(c)) {
            lines.push_str(&format!("\nCursor World Pos: {:.2},{:.2}", world.x, world.y));
        }
        let y = (f64::from(target_size.1) - 32.0).max(0.0);
        renderer.draw_text(target, &lines, dvec2(0.0, y), Color::WHITE);
    }

    fn outline(&mut self, renderer: &mut R, rect: Rect, color: Color) {
        for (from, to) in rect_outline(rect) {
            self.draw_line(renderer, from, to, color);
        }
    }
}
