//! Headless walk-through of a scene with a viewport and a following camera.
//!
//! A scripted player walks right, the camera trails it with a dead-zone,
//! the viewport pans/zooms/rotates, and the screen shakes once. Every 20th
//! frame is written to `target/frames/follow_*.png` at 2x output size.

use glam::{DVec2, dvec2};
use sceneforge::input::Key;
use sceneforge::{
    Camera, Color, FIXED_TIMESTEP, FocusTarget, InputSource, InputState, Overlay, RasterRenderer,
    Rect, Renderer, Screen, ScreenOptions, Transform2D, Viewport,
};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use winit::dpi::PhysicalPosition;

const WORLD_W: u32 = 360;
const WORLD_H: u32 = 280;
const VIEW_W: u32 = 320;
const VIEW_H: u32 = 240;
const OUTPUT_SCALE: u32 = 2;

struct Player {
    center: Cell<DVec2>,
    size: DVec2,
    speed: f64,
}

impl Player {
    fn update(&self, input: &InputState) {
        let mut dir = DVec2::ZERO;
        if input.is_key_down(Key::Left) {
            dir.x -= 1.0;
        }
        if input.is_key_down(Key::Right) {
            dir.x += 1.0;
        }
        if input.is_key_down(Key::Up) {
            dir.y -= 1.0;
        }
        if input.is_key_down(Key::Down) {
            dir.y += 1.0;
        }
        self.center.set(self.center.get() + dir * self.speed);
    }

    fn bounds(&self) -> Rect {
        let top_left = self.center.get() - self.size * 0.5;
        Rect::new(top_left.x, top_left.y, self.size.x, self.size.y)
    }
}

impl FocusTarget for Player {
    fn focus_position(&self) -> DVec2 {
        self.center.get()
    }
}

fn draw_platforms(screen: &mut Screen<RasterRenderer>, renderer: &mut RasterRenderer) {
    for i in 0..20 {
        let rect = Rect::new(f64::from(i) * 50.0, 160.0, 40.0, 20.0);
        screen.draw_rect(renderer, rect, true, Color::rgba8(255, 0, 0, 255));
    }
}

fn script(input: &mut InputState, frame: u32) {
    input.set_key(Key::Right, frame < 90);
    input.set_key(Key::Down, (40..60).contains(&frame));
    input.set_key(Key::D, (90..120).contains(&frame));
    input.set_key(Key::E, (100..140).contains(&frame));
    input.set_key(Key::R, (120..150).contains(&frame));
    input.set_key(Key::Space, frame == 60);
    input.set_key(Key::Z, frame == 170);

    // Cursor sweeps across the 2x window.
    let x = f64::from(frame % 180) / 180.0 * f64::from(VIEW_W * OUTPUT_SCALE);
    input.handle_cursor_moved(PhysicalPosition::new(x, f64::from(VIEW_H)));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut renderer = RasterRenderer::new();

    let player = Rc::new(Player {
        center: Cell::new(dvec2(f64::from(WORLD_W) / 2.0, f64::from(WORLD_H) / 2.0)),
        size: dvec2(16.0, 24.0),
        speed: 3.0,
    });

    let viewport = Viewport::new(
        f64::from(VIEW_W),
        f64::from(VIEW_H),
        f64::from(WORLD_W),
        f64::from(WORLD_H),
    );
    let mut camera = Camera::new(
        f64::from(WORLD_W),
        f64::from(WORLD_H),
        120.0,
        120.0,
        f64::from(WORLD_W) / 3.0,
        f64::from(WORLD_H) / 2.0,
    );
    camera.focus_on(&player);

    let mut screen = Screen::with_options(
        &mut renderer,
        (VIEW_W, VIEW_H),
        (WORLD_W, WORLD_H),
        Some(viewport),
        Some(camera),
        ScreenOptions {
            debug: true,
            shake_seed: Some(7),
            ..ScreenOptions::default()
        },
    )?;
    screen.set_shake_intensity(3.5);

    let mut sprite = renderer.create_surface(16, 24);
    renderer.fill(&mut sprite, Color::rgba8(40, 90, 200, 255));

    let mut overlay = Overlay::new(&mut renderer, VIEW_W, VIEW_H);
    overlay.fill(&mut renderer, Color::TRANSPARENT);
    overlay.draw_rect(
        &mut renderer,
        Rect::new(4.0, 4.0, 60.0, 10.0),
        true,
        Color::rgba8(64, 220, 14, 64),
    );

    let out_dir = Path::new("target/frames");
    std::fs::create_dir_all(out_dir)?;

    let mut input = InputState::default();
    for frame in 0..180 {
        input.begin_frame();
        script(&mut input, frame);

        // Update: controls, then the focus target, then the camera.
        screen.apply_controls(&input.control_deltas(FIXED_TIMESTEP));
        player.update(&input);
        screen.update(FIXED_TIMESTEP);

        // Draw the world, then compose it onto a 2x output.
        screen.fill(&mut renderer, Color::rgba8(202, 244, 244, 255));
        let bounds = player.bounds();
        screen.draw_image(
            &mut renderer,
            &sprite,
            &Transform2D::from_translation(bounds.x, bounds.y),
        );
        screen.draw_rect(&mut renderer, bounds, false, Color::rgba8(255, 0, 0, 64));
        draw_platforms(&mut screen, &mut renderer);

        let mut output = renderer.create_surface(VIEW_W * OUTPUT_SCALE, VIEW_H * OUTPUT_SCALE);
        screen.set_cursor(Some(input.mouse_position() / f64::from(OUTPUT_SCALE)));
        screen.render(&mut renderer, &mut output);
        overlay.render(&mut renderer, &mut output);

        let labels = renderer.take_labels();
        if frame % 20 == 0 {
            let path = out_dir.join(format!("follow_{frame:03}.png"));
            output.save(&path)?;
            tracing::info!(
                frame,
                path = %path.display(),
                labels = labels.len(),
                camera = ?screen.camera().map(|c| c.position()),
                "frame written"
            );
        }
    }

    Ok(())
}
