//! The host side of rendering: a `Renderer` receives the three lifecycle callbacks
//! of whatever owns the drawing surface.
//!
//! ```rust
//! use glprims::prelude::*;
//!
//! let mut ctx = RenderContext::headless();
//! let mut renderer = SceneRenderer::new(SceneDescriptor::default());
//!
//! renderer.on_context_created(&mut ctx).unwrap();
//! renderer.on_surface_resized(&mut ctx, 640, 480).unwrap();
//! renderer.on_draw_frame(&mut ctx).unwrap();
//! ```

pub mod settings;

#[cfg(feature = "window")]
pub mod window;

pub mod prelude {
    pub use super::settings::{Settings, WindowParams};
    pub use super::{Renderer, SceneRenderer};
}

use crate::errors::*;
use crate::scene::{Scene, SceneDescriptor};
use crate::video::RenderContext;

/// The lifecycle callbacks a host invokes on its rendering thread.
pub trait Renderer {
    /// The GL context has been created and made current. GPU objects are built here.
    fn on_context_created(&mut self, ctx: &mut RenderContext) -> Result<()>;

    /// The drawing surface changed its size, in pixels.
    fn on_surface_resized(&mut self, ctx: &mut RenderContext, width: u32, height: u32)
        -> Result<()>;

    /// Renders one frame.
    fn on_draw_frame(&mut self, ctx: &mut RenderContext) -> Result<()>;

    /// The GL context is about to be destroyed.
    fn on_context_destroyed(&mut self, _: &mut RenderContext) -> Result<()> {
        Ok(())
    }
}

/// Draws the active primitives of a `Scene` on top of its clear color.
pub struct SceneRenderer {
    descriptor: SceneDescriptor,
    scene: Option<Scene>,
}

impl SceneRenderer {
    pub fn new(descriptor: SceneDescriptor) -> Self {
        SceneRenderer {
            descriptor,
            scene: None,
        }
    }

    #[inline]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    #[inline]
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }
}

impl Renderer for SceneRenderer {
    fn on_context_created(&mut self, ctx: &mut RenderContext) -> Result<()> {
        if let Some(scene) = self.scene.take() {
            scene.release(ctx)?;
        }

        ctx.set_clear_color(self.descriptor.clear_color);
        self.scene = Some(Scene::build(ctx, &self.descriptor)?);
        Ok(())
    }

    fn on_surface_resized(&mut self, ctx: &mut RenderContext, width: u32, height: u32) -> Result<()> {
        ctx.update_viewport(width, height)
    }

    fn on_draw_frame(&mut self, ctx: &mut RenderContext) -> Result<()> {
        let scene = self
            .scene
            .as_ref()
            .ok_or_else(|| Error::Scene("not created".into()))?;

        ctx.clear()?;
        scene.draw(ctx)?;
        ctx.advance();
        Ok(())
    }

    fn on_context_destroyed(&mut self, ctx: &mut RenderContext) -> Result<()> {
        match self.scene.take() {
            Some(scene) => scene.release(ctx),
            None => Ok(()),
        }
    }
}

/// Initializes the global logger, honouring `RUST_LOG` and falling back to `info`.
/// Subsequent calls are ignored.
#[cfg(feature = "window")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        debug!("logging initialized");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::Command;
    use crate::video::FrameInfo;

    #[test]
    fn lifecycle() {
        let (mut ctx, log) = RenderContext::recording();
        let mut renderer = SceneRenderer::new(SceneDescriptor::default());

        match renderer.on_draw_frame(&mut ctx) {
            Err(Error::Scene(_)) => {}
            other => panic!("unexpected {:?}", other),
        }

        renderer.on_context_created(&mut ctx).unwrap();
        renderer.on_surface_resized(&mut ctx, 320, 240).unwrap();
        log.clear();

        renderer.on_draw_frame(&mut ctx).unwrap();
        let cmds = log.take();
        assert_eq!(cmds[0], Command::Clear(crate::utils::Color::white()));
        assert_eq!(
            ctx.frame_info(),
            FrameInfo {
                drawcalls: 1,
                primitives: 24
            }
        );

        renderer.on_context_destroyed(&mut ctx).unwrap();
        assert!(renderer.scene().is_none());
    }
}
