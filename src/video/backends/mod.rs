//! The backend of renderer, which should be responsible for only one thing:
//! submitting draw-calls using low-level OpenGL video APIs.

pub mod headless;
mod utils;

use super::assets::prelude::*;

use crate::errors::*;
use crate::utils::Color;

/// Every GPU side effect of the crate goes through a `Visitor`. The methods are
/// `unsafe` because an OpenGL implementation requires its context to be current on
/// the calling thread.
pub trait Visitor {
    /// Compiles both stages and links them into a program named by `handle`.
    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        params: ShaderParams,
        vs: &str,
        fs: &str,
    ) -> Result<()>;

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    /// Uploads an immutable vertex buffer, and index buffer if any.
    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()>;

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()>;

    unsafe fn update_surface_viewport(&mut self, vp: SurfaceViewport) -> Result<()>;

    /// Clears the color buffer of the default framebuffer.
    unsafe fn clear(&mut self, color: Color) -> Result<()>;

    /// Binds the program and the position attribute, uploads `color` and submits one
    /// draw call. Returns the number of assembled points, segments or triangles.
    unsafe fn draw(&mut self, shader: ShaderHandle, mesh: MeshHandle, color: Color) -> Result<u32>;

    /// Blocks until all execution is complete.
    unsafe fn flush(&mut self) -> Result<()>;
}

pub mod gl;

/// Creates the OpenGL visitor, loading function pointers with `loader`.
///
/// # Unsafe
///
/// The context `loader` resolves symbols from must be current on this thread.
pub unsafe fn new<F>(loader: F) -> Result<Box<dyn Visitor>>
where
    F: FnMut(&str) -> *const ::std::os::raw::c_void,
{
    ::gl::load_with(loader);
    let visitor = self::gl::visitor::GLVisitor::new()?;
    Ok(Box::new(visitor))
}

pub fn new_headless() -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new())
}
