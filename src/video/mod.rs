//! The video module hides the GPU behind an explicit `RenderContext`.
//!
//! Every binding a draw call performs (program, vertex buffers, attribute arrays,
//! uniforms) goes through the context handed to it, instead of some ambient global
//! state. The context owns a backend `Visitor`, allocates the typed handles naming
//! GPU objects and remembers the clear color and the viewport.
//!
//! ```rust
//! use glprims::prelude::*;
//!
//! let mut ctx = RenderContext::headless();
//! let geometry = shapes::triangle().unwrap();
//! let mesh = ctx.create_mesh(&geometry).unwrap();
//! let shader = ctx
//!     .create_shader(ShaderParams::default(), &ShaderSources::fixed(None))
//!     .unwrap();
//!
//! ctx.clear().unwrap();
//! assert_eq!(ctx.draw(shader, mesh, Color::black()).unwrap(), 1);
//! ```

pub mod assets;
pub mod backends;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::headless::{Command, CommandLog};
    pub use super::{FrameInfo, RenderContext};
}

use self::assets::prelude::*;
use self::backends::headless::{CommandLog, HeadlessVisitor};
use self::backends::Visitor;

use crate::errors::*;
use crate::geometry::Geometry;
use crate::utils::{Color, HandlePool};

/// Statistics of the draw calls submitted since the last `advance`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub drawcalls: u32,
    pub primitives: u32,
}

/// The explicit owner of GPU binding state.
pub struct RenderContext {
    visitor: Box<dyn Visitor>,
    shaders: HandlePool,
    meshes: HandlePool,
    clear_color: Color,
    viewport: SurfaceViewport,
    info: FrameInfo,
    last_frame: FrameInfo,
}

impl RenderContext {
    /// Creates a context drawing through OpenGL, resolving function pointers with
    /// `loader`.
    ///
    /// # Unsafe
    ///
    /// The GL context `loader` belongs to must be current on this thread, and stay
    /// current as long as the returned `RenderContext` is used.
    pub unsafe fn gl<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const ::std::os::raw::c_void,
    {
        let visitor = backends::new(loader)?;
        Ok(RenderContext::with_visitor(visitor))
    }

    /// Creates a context without GPU, drawing through a `HeadlessVisitor`.
    pub fn headless() -> Self {
        RenderContext::with_visitor(backends::new_headless())
    }

    /// Creates a headless context, and returns the log its commands are recorded into.
    pub fn recording() -> (Self, CommandLog) {
        let visitor = HeadlessVisitor::new();
        let log = visitor.log();
        (RenderContext::with_visitor(Box::new(visitor)), log)
    }

    pub fn with_visitor(visitor: Box<dyn Visitor>) -> Self {
        RenderContext {
            visitor,
            shaders: HandlePool::new(),
            meshes: HandlePool::new(),
            clear_color: Color::white(),
            viewport: SurfaceViewport::default(),
            info: FrameInfo::default(),
            last_frame: FrameInfo::default(),
        }
    }
}

impl RenderContext {
    /// Compiles and links `sources` into a program.
    pub fn create_shader(
        &mut self,
        params: ShaderParams,
        sources: &ShaderSources,
    ) -> Result<ShaderHandle> {
        let handle = self.shaders.create::<ShaderHandle>();

        let result = unsafe {
            self.visitor
                .create_shader(handle, params, &sources.vertex, &sources.fragment)
        };

        if let Err(err) = result {
            self.shaders.free(handle);
            return Err(err);
        }

        debug!("[RenderContext] creates {} with {:?}.", handle, params);
        Ok(handle)
    }

    /// Deletes the program named by `handle`.
    pub fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        if !self.shaders.free(handle) {
            return Err(Error::ShaderHandleInvalid(handle));
        }

        unsafe { self.visitor.delete_shader(handle)? };
        debug!("[RenderContext] deletes {}.", handle);
        Ok(())
    }

    #[inline]
    pub fn is_shader_alive(&self, handle: ShaderHandle) -> bool {
        self.shaders.is_alive(handle)
    }

    /// Uploads `geometry` into immutable GPU buffers.
    pub fn create_mesh(&mut self, geometry: &Geometry) -> Result<MeshHandle> {
        let handle = self.meshes.create::<MeshHandle>();
        let params = MeshParams::from(geometry);
        let data = MeshData::from(geometry);

        let result = unsafe { self.visitor.create_mesh(handle, params, data) };
        if let Err(err) = result {
            self.meshes.free(handle);
            return Err(err);
        }

        debug!(
            "[RenderContext] creates {} ({:?}, {} vertices).",
            handle, params.topology, params.num_verts
        );
        Ok(handle)
    }

    /// Deletes the buffers named by `handle`.
    pub fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        if !self.meshes.free(handle) {
            return Err(Error::MeshHandleInvalid(handle));
        }

        unsafe { self.visitor.delete_mesh(handle)? };
        debug!("[RenderContext] deletes {}.", handle);
        Ok(())
    }

    #[inline]
    pub fn is_mesh_alive(&self, handle: MeshHandle) -> bool {
        self.meshes.is_alive(handle)
    }
}

impl RenderContext {
    #[inline]
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color.clip();
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Clears the color buffer with the current clear color.
    pub fn clear(&mut self) -> Result<()> {
        unsafe { self.visitor.clear(self.clear_color) }
    }

    /// Maps normalized device coordinates onto the whole `width` x `height` surface.
    pub fn update_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        let vp = SurfaceViewport::full(width, height);
        unsafe { self.visitor.update_surface_viewport(vp)? };

        if self.viewport != vp {
            info!("[RenderContext] viewport resized to {}x{}.", width, height);
            self.viewport = vp;
        }

        Ok(())
    }

    #[inline]
    pub fn viewport(&self) -> SurfaceViewport {
        self.viewport
    }

    /// Draws `mesh` with `shader`, filling every covered pixel with `color`. Returns
    /// the number of points, segments or triangles assembled.
    pub fn draw(&mut self, shader: ShaderHandle, mesh: MeshHandle, color: Color) -> Result<u32> {
        if !self.shaders.is_alive(shader) {
            return Err(Error::ShaderHandleInvalid(shader));
        }

        if !self.meshes.is_alive(mesh) {
            return Err(Error::MeshHandleInvalid(mesh));
        }

        let primitives = unsafe { self.visitor.draw(shader, mesh, color)? };
        self.info.drawcalls += 1;
        self.info.primitives += primitives;
        Ok(primitives)
    }

    /// Ends the current frame, returning its statistics.
    pub fn advance(&mut self) -> FrameInfo {
        self.last_frame = self.info;
        self.info = FrameInfo::default();
        self.last_frame
    }

    /// Statistics of the last finished frame.
    #[inline]
    pub fn frame_info(&self) -> FrameInfo {
        self.last_frame
    }

    /// Blocks until every submitted command has completed.
    pub fn flush(&mut self) -> Result<()> {
        unsafe { self.visitor.flush() }
    }
}

#[cfg(test)]
mod test {
    use super::backends::headless::Command;
    use super::*;
    use crate::geometry::shapes;
    use crate::utils::HandleLike;

    #[test]
    fn handles() {
        let mut ctx = RenderContext::headless();
        let mesh = ctx.create_mesh(&shapes::square().unwrap()).unwrap();
        assert!(ctx.is_mesh_alive(mesh));

        ctx.delete_mesh(mesh).unwrap();
        assert!(!ctx.is_mesh_alive(mesh));

        match ctx.delete_mesh(mesh) {
            Err(Error::MeshHandleInvalid(h)) => assert_eq!(h, mesh),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failed_shader_frees_handle() {
        let mut ctx = RenderContext::headless();
        let sources = ShaderSources {
            vertex: "void nope(){}".into(),
            fragment: assets::shader::FRAGMENT_SOURCE.into(),
        };

        assert!(ctx.create_shader(ShaderParams::default(), &sources).is_err());

        let shader = ctx
            .create_shader(ShaderParams::default(), &ShaderSources::fixed(None))
            .unwrap();
        assert_eq!(shader.index(), 0);
    }

    #[test]
    fn frame_info() {
        let mut ctx = RenderContext::headless();
        let mesh = ctx.create_mesh(&shapes::square().unwrap()).unwrap();
        let shader = ctx
            .create_shader(ShaderParams::default(), &ShaderSources::fixed(Some(50.0)))
            .unwrap();

        ctx.draw(shader, mesh, Color::teal()).unwrap();
        ctx.draw(shader, mesh, Color::teal()).unwrap();

        let info = ctx.advance();
        assert_eq!(info.drawcalls, 2);
        assert_eq!(info.primitives, 4);
        assert_eq!(ctx.frame_info(), info);
        assert_eq!(ctx.advance(), FrameInfo::default());
    }

    #[test]
    fn viewport_and_clear() {
        let (mut ctx, log) = RenderContext::recording();
        ctx.update_viewport(640, 480).unwrap();
        ctx.update_viewport(640, 480).unwrap();
        ctx.set_clear_color(Color(2.0, 1.0, 1.0, 1.0));
        ctx.clear().unwrap();

        assert_eq!(ctx.viewport().size.x, 640);
        assert_eq!(
            log.take(),
            vec![
                Command::Viewport(SurfaceViewport::full(640, 480)),
                Command::Clear(Color::white()),
            ]
        );
    }
}
