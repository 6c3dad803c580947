// Draw passthroughs. Callers pass world coordinates; the current camera /
// padding offset is added before the renderer sees them.

use super::Screen;
use crate::renderer::{Renderer, rect_outline};
use crate::transform::Transform2D;
use crate::{Color, Rect};
use glam::DVec2;

impl<R: Renderer> Screen<R> {
    /// Fills the whole surface, padding included.
    pub fn fill(&mut self, renderer: &mut R, color: Color) {
        renderer.fill(&mut self.surface, color);
    }

    /// `transform` places `image` in world space.
    pub fn draw_image(&mut self, renderer: &mut R, image: &R::Surface, transform: &Transform2D) {
        let mut placed = *transform;
        placed.concat(&self.offset_matrix());
        renderer.draw_image(&mut self.surface, image, &placed);
    }

    pub fn draw_line(&mut self, renderer: &mut R, from: DVec2, to: DVec2, color: Color) {
        let offset = self.offsets();
        renderer.draw_line(&mut self.surface, from + offset, to + offset, color);
    }

    /// Filled when `solid`, otherwise a 1px outline kept inside `rect`.
    pub fn draw_rect(&mut self, renderer: &mut R, rect: Rect, solid: bool, color: Color) {
        if solid {
            let offset = self.offsets();
            renderer.fill_rect(&mut self.surface, rect.translated(offset), color);
        } else {
            for (from, to) in rect_outline(rect) {
                self.draw_line(renderer, from, to, color);
            }
        }
    }

    pub fn draw_text(&mut self, renderer: &mut R, text: &str, at: DVec2, color: Color) {
        let offset = self.offsets();
        renderer.draw_text(&mut self.surface, text, at + offset, color);
    }

    pub fn debug_print(&mut self, renderer: &mut R, text: &str) {
        self.debug_print_at(renderer, text, DVec2::ZERO);
    }

    pub fn debug_print_at(&mut self, renderer: &mut R, text: &str, at: DVec2) {
        self.draw_text(renderer, text, at, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use crate::camera::Camera;
    use crate::config::ScreenOptions;
    use crate::renderer::{DrawCommand, Recorder, Renderer};
    use crate::screen::Screen;
    use crate::transform::Transform2D;
    use crate::{Color, Rect};
    use glam::{DVec2, dvec2};

    fn padded_screen(r: &mut Recorder) -> Screen<Recorder> {
        let cam = Camera::new(320.0, 240.0, 100.0, 100.0, 160.0, 120.0);
        let mut screen = Screen::with_options(
            r,
            (320, 240),
            (320, 240),
            None,
            Some(cam),
            ScreenOptions::default(),
        )
        .unwrap();
        // offset = padding (20, 20) + camera (-10, 5)
        screen.camera_mut().unwrap().move_by(10.0, -5.0);
        screen
    }

    #[test]
    fn line_and_text_are_offset() {
        let mut r = Recorder::new();
        let mut screen = padded_screen(&mut r);
        screen.draw_line(&mut r, dvec2(0.0, 0.0), dvec2(5.0, 5.0), Color::RED);
        screen.debug_print(&mut r, "hi");

        assert_eq!(r.lines().next(), Some((dvec2(10.0, 25.0), dvec2(15.0, 30.0))));
        match &r.commands[1] {
            DrawCommand::Text { text, at, .. } => {
                assert_eq!(text, "hi");
                assert_eq!(*at, dvec2(10.0, 25.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn solid_rect_is_offset() {
        let mut r = Recorder::new();
        let mut screen = padded_screen(&mut r);
        screen.draw_rect(&mut r, Rect::new(1.0, 2.0, 3.0, 4.0), true, Color::BLUE);
        assert_eq!(
            r.commands[0],
            DrawCommand::Rect {
                target: *screen.surface(),
                rect: Rect::new(11.0, 27.0, 3.0, 4.0),
                color: Color::BLUE,
            }
        );
    }

    #[test]
    fn outline_rect_is_four_offset_lines() {
        let mut r = Recorder::new();
        let mut screen = padded_screen(&mut r);
        screen.draw_rect(&mut r, Rect::new(0.0, 0.0, 10.0, 10.0), false, Color::RED);
        let lines: Vec<_> = r.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], (dvec2(10.0, 25.0), dvec2(20.0, 25.0)));
    }

    #[test]
    fn image_transform_gets_offset_appended() {
        let mut r = Recorder::new();
        let mut screen = padded_screen(&mut r);
        let sprite = r.create_surface(8, 8);
        screen.draw_image(&mut r, &sprite, &Transform2D::from_translation(100.0, 50.0));

        match &r.commands[0] {
            DrawCommand::Image { transform, .. } => {
                assert!(transform.apply(DVec2::ZERO).abs_diff_eq(dvec2(110.0, 75.0), 1e-12));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fill_targets_the_surface() {
        let mut r = Recorder::new();
        let mut screen = padded_screen(&mut r);
        screen.fill(&mut r, Color::BLACK);
        assert_eq!(
            r.commands[0],
            DrawCommand::Fill {
                target: *screen.surface(),
                color: Color::BLACK,
            }
        );
    }
}
