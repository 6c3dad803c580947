//! A screen whose world is exactly the size of the view.
//!
//! No viewport is involved: the compositor pads the world with a fixed
//! border so the shake never reveals the edge of the surface. Frames are
//! scaled up to 640x480 and a few of them land in `target/frames/`.

use glam::dvec2;
use sceneforge::{Color, FIXED_TIMESTEP, RasterRenderer, Rect, Renderer, Screen, ScreenOptions};
use std::path::Path;

const VIEW_W: u32 = 320;
const VIEW_H: u32 = 240;

fn draw_scene(screen: &mut Screen<RasterRenderer>, renderer: &mut RasterRenderer, frame: u32) {
    screen.fill(renderer, Color::rgba8(24, 24, 32, 255));

    for row in 0..6 {
        for col in 0..8 {
            let shade = if (row + col) % 2 == 0 { 60 } else { 90 };
            let rect = Rect::new(f64::from(col) * 40.0, f64::from(row) * 40.0, 40.0, 40.0);
            screen.draw_rect(renderer, rect, true, Color::rgba8(shade, shade, shade + 20, 255));
        }
    }

    let x = f64::from(frame * 2 % VIEW_W);
    screen.draw_line(renderer, dvec2(x, 0.0), dvec2(x, f64::from(VIEW_H)), Color::GREEN);
    screen.draw_rect(
        renderer,
        Rect::new(0.0, 0.0, f64::from(VIEW_W), f64::from(VIEW_H)),
        false,
        Color::WHITE,
    );
    screen.debug_print(renderer, &format!("frame {frame}"));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut renderer = RasterRenderer::new();
    let mut screen = Screen::with_options(
        &mut renderer,
        (VIEW_W, VIEW_H),
        (VIEW_W, VIEW_H),
        None,
        None,
        ScreenOptions {
            debug: true,
            shake_max_intensity: 6.0,
            shake_seed: Some(42),
            ..ScreenOptions::default()
        },
    )?;
    tracing::info!(
        surface = ?screen.surface_size(),
        padding = screen.options().padding,
        "auto-padded screen ready"
    );

    let out_dir = Path::new("target/frames");
    std::fs::create_dir_all(out_dir)?;

    for frame in 0..90 {
        if frame == 10 {
            screen.shake();
        }
        screen.update(FIXED_TIMESTEP);

        draw_scene(&mut screen, &mut renderer, frame);

        let mut output = renderer.create_surface(VIEW_W * 2, VIEW_H * 2);
        screen.render(&mut renderer, &mut output);
        renderer.take_labels();

        if frame % 15 == 0 {
            let path = out_dir.join(format!("static_{frame:03}.png"));
            output.save(&path)?;
            tracing::info!(
                frame,
                path = %path.display(),
                amplitude = screen.shake_controller().amplitude(),
                "frame written"
            );
        }
    }

    Ok(())
}
