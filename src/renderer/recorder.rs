use super::Renderer;
use crate::transform::Transform2D;
use crate::{Color, Rect};
use glam::DVec2;

/// Handle to a surface created by a [`Recorder`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SurfaceId(pub u32);

/// One call received by a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill {
        target: SurfaceId,
        color: Color,
    },
    Image {
        target: SurfaceId,
        image: SurfaceId,
        transform: Transform2D,
    },
    Line {
        target: SurfaceId,
        from: DVec2,
        to: DVec2,
        color: Color,
    },
    Rect {
        target: SurfaceId,
        rect: Rect,
        color: Color,
    },
    Text {
        target: SurfaceId,
        text: String,
        at: DVec2,
    },
    Present {
        target: SurfaceId,
        source: SurfaceId,
        transform: Transform2D,
    },
}

/// Renderer that draws nothing and remembers every call.
///
/// Useful for checking what a compositor emitted without any pixels.
#[derive(Debug, Default)]
pub struct Recorder {
    sizes: Vec<(u32, u32)>,
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent `Present` command, if any.
    pub fn last_present(&self) -> Option<(SurfaceId, SurfaceId, Transform2D)> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DrawCommand::Present {
                target,
                source,
                transform,
            } => Some((*target, *source, *transform)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for Recorder {
    type Surface = SurfaceId;

    fn create_surface(&mut self, width: u32, height: u32) -> SurfaceId {
        let id = SurfaceId(self.sizes.len() as u32);
        self.sizes.push((width, height));
        id
    }

    fn surface_size(&self, surface: &SurfaceId) -> (u32, u32) {
        self.sizes.get(surface.0 as usize).copied().unwrap_or((0, 0))
    }

    fn fill(&mut self, target: &mut SurfaceId, color: Color) {
        self.commands.push(DrawCommand::Fill {
            target: *target,
            color,
        });
    }

    fn draw_image(&mut self, target: &mut SurfaceId, image: &SurfaceId, transform: &Transform2D) {
        self.commands.push(DrawCommand::Image {
            target: *target,
            image: *image,
            transform: *transform,
        });
    }

    fn draw_line(&mut self, target: &mut SurfaceId, from: DVec2, to: DVec2, color: Color) {
        self.commands.push(DrawCommand::Line {
            target: *target,
            from,
            to,
            color,
        });
    }

    fn fill_rect(&mut self, target: &mut SurfaceId, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            target: *target,
            rect,
            color,
        });
    }

    fn draw_text(&mut self, target: &mut SurfaceId, text: &str, at: DVec2, _color: Color) {
        self.commands.push(DrawCommand::Text {
            target: *target,
            text: text.to_owned(),
            at,
        });
    }

    fn present(&mut self, target: &mut SurfaceId, source: &SurfaceId, transform: &Transform2D) {
        self.commands.push(DrawCommand::Present {
            target: *target,
            source: *source,
            transform: *transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_ids_are_unique_and_sized() {
        let mut r = Recorder::new();
        let a = r.create_surface(10, 20);
        let b = r.create_surface(30, 40);
        assert_ne!(a, b);
        assert_eq!(r.surface_size(&a), (10, 20));
        assert_eq!(r.surface_size(&b), (30, 40));
        assert_eq!(r.surface_size(&SurfaceId(99)), (0, 0));
    }

    #[test]
    fn records_in_order() {
        let mut r = Recorder::new();
        let mut s = r.create_surface(1, 1);
        r.fill(&mut s, Color::BLACK);
        r.draw_line(&mut s, DVec2::ZERO, DVec2::ONE, Color::RED);
        r.draw_text(&mut s, "x", DVec2::ZERO, Color::WHITE);

        assert!(matches!(r.commands[0], DrawCommand::Fill { .. }));
        assert_eq!(r.lines().count(), 1);
        assert_eq!(r.texts().collect::<Vec<_>>(), vec!["x"]);
        assert!(r.last_present().is_none());
    }
}
