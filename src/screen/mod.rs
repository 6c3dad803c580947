use crate::camera::Camera;
use crate::config::ScreenOptions;
use crate::error::ConfigError;
use crate::input::ControlDeltas;
use crate::renderer::Renderer;
use crate::shake::ShakeController;
use crate::transform::Transform2D;
use crate::viewport::Viewport;
use glam::DVec2;

mod debug;
mod drawing;

/// Scene compositor.
///
/// Owns an off-screen surface the size of the world (plus padding in
/// auto-padding mode). Scene code draws in world coordinates through the
/// passthroughs in `drawing.rs`, which add the current camera / padding
/// offset. `render` then blits the surface to the final target through
/// shake jitter, the viewport matrix and output scaling, in that order.
///
/// Auto-padding mode is used when the view and world have the same size; in
/// that case there is no viewport and the world gets a fixed border so shake
/// never exposes the surface edge.
pub struct Screen<R: Renderer> {
    screen_size: (u32, u32),
    surface_size: (u32, u32),
    surface: R::Surface,
    viewport: Option<Viewport>,
    camera: Option<Camera>,
    shake: ShakeController,
    options: ScreenOptions,
    auto_padding: bool,
    // Cursor in screen space, for the debug readout.
    cursor: Option<DVec2>,
    last_dt: f64,
}

impl<R: Renderer> Screen<R> {
    pub fn new(
        renderer: &mut R,
        view: (u32, u32),
        world: (u32, u32),
        viewport: Option<Viewport>,
        camera: Option<Camera>,
    ) -> Result<Self, ConfigError> {
        Self::with_options(
            renderer,
            view,
            world,
            viewport,
            camera,
            ScreenOptions::default(),
        )
    }

    /// Fails when a viewport is given for a view the size of the world, when
    /// none is given for a view of a different size, or when either size is
    /// empty.
    pub fn with_options(
        renderer: &mut R,
        view: (u32, u32),
        world: (u32, u32),
        viewport: Option<Viewport>,
        camera: Option<Camera>,
        options: ScreenOptions,
    ) -> Result<Self, ConfigError> {
        let auto_padding = validate(view, world, viewport.is_some()).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected screen configuration");
        })?;

        let surface_size = if auto_padding {
            padded_size(world, options.padding).inspect_err(|e| {
                tracing::warn!(error = %e, "rejected screen configuration");
            })?
        } else {
            world
        };
        let surface = renderer.create_surface(surface_size.0, surface_size.1);

        let mut shake = match options.shake_seed {
            Some(seed) => ShakeController::with_seed(seed),
            None => ShakeController::new(),
        };
        shake.set_intensity(options.shake_max_intensity);

        let mut camera = camera;
        if let Some(camera) = camera.as_mut() {
            camera.set_debug(options.debug);
        }

        tracing::debug!(
            ?view,
            ?world,
            ?surface_size,
            auto_padding,
            has_camera = camera.is_some(),
            "screen created"
        );

        Ok(Self {
            screen_size: view,
            surface_size,
            surface,
            viewport,
            camera,
            shake,
            options,
            auto_padding,
            cursor: None,
            last_dt: 0.0,
        })
    }

    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn surface(&self) -> &R::Surface {
        &self.surface
    }

    pub fn is_auto_padding(&self) -> bool {
        self.auto_padding
    }

    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut Viewport> {
        self.viewport.as_mut()
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    pub fn shake_controller(&self) -> &ShakeController {
        &self.shake
    }

    pub fn set_debug(&mut self, enabled: bool) {
        if self.options.debug != enabled {
            tracing::debug!(enabled, "screen debug overlays toggled");
        }
        self.options.debug = enabled;
        if let Some(camera) = self.camera.as_mut() {
            camera.set_debug(enabled);
        }
    }

    pub fn set_auto_scaling(&mut self, auto_scaling: bool) {
        self.options.auto_scaling = auto_scaling;
    }

    /// Cursor position in screen space, shown in world coordinates by the
    /// debug overlay.
    pub fn set_cursor(&mut self, cursor: Option<DVec2>) {
        self.cursor = cursor;
    }

    pub fn shake(&mut self) {
        self.shake.shake();
    }

    pub fn set_shake_intensity(&mut self, max_intensity: f64) {
        self.shake.set_intensity(max_intensity);
    }

    /// Applies one tick of input to the viewport, the camera and the shake.
    pub fn apply_controls(&mut self, controls: &ControlDeltas) {
        if let Some(viewport) = self.viewport.as_mut() {
            if controls.pan != DVec2::ZERO {
                viewport.pan(controls.pan.x, controls.pan.y);
            }
            if controls.zoom != 0 {
                viewport.zoom_by(controls.zoom);
            }
            if controls.rotation != 0 {
                viewport.rotate_by(controls.rotation);
            }
            if controls.reset {
                viewport.reset();
            }
        }
        if controls.camera_pan != DVec2::ZERO {
            if let Some(camera) = self.camera.as_mut() {
                camera.move_by(controls.camera_pan.x, controls.camera_pan.y);
            }
        }
        if controls.shake {
            self.shake.shake();
        }
    }

    /// Advances the scene by `dt` seconds: camera follow, then shake decay.
    ///
    /// The focus target must already have moved this tick.
    pub fn update(&mut self, dt: f64) {
        if let Some(camera) = self.camera.as_mut() {
            camera.update();
        }
        self.shake.update(dt);
        self.last_dt = dt;
    }

    fn padding(&self) -> DVec2 {
        if self.auto_padding {
            DVec2::splat(self.options.padding)
        } else {
            DVec2::ZERO
        }
    }

    /// World → surface translation: camera offset plus auto-padding.
    pub fn offsets(&self) -> DVec2 {
        let camera = self.camera.as_ref().map_or(DVec2::ZERO, Camera::offset);
        camera + self.padding()
    }

    pub fn offset_matrix(&self) -> Transform2D {
        let offset = self.offsets();
        Transform2D::from_translation(offset.x, offset.y)
    }

    /// Builds the surface → target transform for this frame. Samples new shake
    /// jitter on every call.
    pub fn compose_transform(&mut self, target_size: (u32, u32)) -> Transform2D {
        let mut m = Transform2D::new();

        let jitter = self.shake.sample_jitter();
        if jitter != DVec2::ZERO {
            m.translate(-jitter.x, -jitter.y);
        }

        match &self.viewport {
            Some(viewport) => m.concat(&viewport.render_matrix()),
            None => {
                let padding = self.padding();
                m.translate(-padding.x, -padding.y);
            }
        }

        if self.options.auto_scaling && target_size != self.screen_size {
            let sx = f64::from(target_size.0) / f64::from(self.screen_size.0);
            let sy = f64::from(target_size.1) / f64::from(self.screen_size.1);
            m.scale(sx, sy);
        }

        m
    }

    /// Blits the scene onto `target`.
    pub fn render(&mut self, renderer: &mut R, target: &mut R::Surface) {
        if self.options.debug {
            self.draw_debug_areas(renderer);
        }

        let target_size = renderer.surface_size(target);
        let transform = self.compose_transform(target_size);
        renderer.present(target, &self.surface, &transform);

        if self.options.debug {
            self.draw_debug_text(renderer, target, target_size);
        }
    }

    /// Screen-space point → world coordinates, ignoring shake and output
    /// scaling. `None` when the viewport matrix cannot be inverted.
    pub fn screen_to_world(&self, screen: DVec2) -> Option<DVec2> {
        let on_surface = match &self.viewport {
            Some(viewport) => viewport.try_screen_to_world(screen)?,
            None => screen + self.padding(),
        };
        Some(on_surface - self.offsets())
    }
}

/// Returns whether auto-padding applies.
fn validate(view: (u32, u32), world: (u32, u32), has_viewport: bool) -> Result<bool, ConfigError> {
    for (what, (width, height)) in [("view", view), ("world", world)] {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyView {
                what,
                width,
                height,
            });
        }
    }

    if view == world {
        if has_viewport {
            return Err(ConfigError::UnexpectedViewport {
                width: view.0,
                height: view.1,
            });
        }
        Ok(true)
    } else {
        if !has_viewport {
            return Err(ConfigError::MissingViewport {
                view_width: view.0,
                view_height: view.1,
                world_width: world.0,
                world_height: world.1,
            });
        }
        Ok(false)
    }
}

/// World size plus the auto-padding border on every side.
fn padded_size(world: (u32, u32), padding: f64) -> Result<(u32, u32), ConfigError> {
    // `as` saturates, so an absurd padding ends up in the overflow check.
    let border = (padding.max(0.0) * 2.0).ceil() as u32;
    match (world.0.checked_add(border), world.1.checked_add(border)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ConfigError::SurfaceTooLarge {
            width: world.0,
            height: world.1,
            padding,
        }),
    }
}
