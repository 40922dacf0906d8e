use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

use gl::types::*;

use crate::errors::*;
use crate::utils::Color;

use super::super::super::assets::prelude::*;
use super::super::super::assets::shader::{COLOR_UNIFORM, POSITION_ATTRIBUTE};
use super::super::utils::DataVec;
use super::super::Visitor;
use super::capabilities::{Capabilities, Version};

#[derive(Debug, Clone)]
struct GLShaderData {
    handle: ShaderHandle,
    id: GLuint,
    params: ShaderParams,
    position: GLuint,
    color: GLint,
}

#[derive(Debug, Clone)]
struct GLMeshData {
    handle: MeshHandle,
    vbo: GLuint,
    ibo: Option<GLuint>,
    params: MeshParams,
}

struct GLMutableState {
    view: SurfaceViewport,
    binded_shader: Option<ShaderHandle>,
}

pub struct GLVisitor {
    state: GLMutableState,
    capabilities: Capabilities,
    vao: Option<GLuint>,
    shaders: DataVec<GLShaderData>,
    meshes: DataVec<GLMeshData>,
}

impl GLVisitor {
    /// Creates a visitor on top of the OpenGL functions already loaded through
    /// `gl::load_with`.
    ///
    /// # Unsafe
    ///
    /// The context the functions were loaded from must be current on this thread.
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);
        check_capabilities(&capabilities)?;

        // Desktop contexts ignore `gl_PointSize` unless told otherwise.
        if capabilities.is_desktop() {
            gl::Enable(gl::PROGRAM_POINT_SIZE);
        }

        // Core profiles refuse attribute pointers without a bound vertex array.
        let vao = if capabilities.requires_vertex_array() {
            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            Some(vao)
        } else {
            None
        };

        gl::Disable(gl::DEPTH_TEST);
        gl::Disable(gl::CULL_FACE);
        check()?;

        Ok(GLVisitor {
            state: GLMutableState {
                view: SurfaceViewport::default(),
                binded_shader: None,
            },
            capabilities,
            vao,
            shaders: DataVec::new(),
            meshes: DataVec::new(),
        })
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl Drop for GLVisitor {
    fn drop(&mut self) {
        if let Some(vao) = self.vao {
            unsafe { gl::DeleteVertexArrays(1, &vao) };
        }
    }
}

impl Visitor for GLVisitor {
    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        params: ShaderParams,
        vs: &str,
        fs: &str,
    ) -> Result<()> {
        let vs = Self::compile(ShaderStage::Vertex, vs)?;
        let fs = match Self::compile(ShaderStage::Fragment, fs) {
            Ok(fs) => fs,
            Err(err) => {
                gl::DeleteShader(vs);
                return Err(err);
            }
        };

        let id = match Self::link(&[vs, fs]) {
            Ok(id) => id,
            Err(err) => {
                gl::DeleteShader(vs);
                gl::DeleteShader(fs);
                return Err(err);
            }
        };

        gl::DetachShader(id, vs);
        gl::DeleteShader(vs);
        gl::DetachShader(id, fs);
        gl::DeleteShader(fs);

        let locations = check().and_then(|_| {
            let position = gl::GetAttribLocation(id, c_string(POSITION_ATTRIBUTE)?.as_ptr());
            let color = gl::GetUniformLocation(id, c_string(COLOR_UNIFORM)?.as_ptr());
            check().map(|_| (position, color))
        });

        let (position, color) = match locations {
            Ok(v) => v,
            Err(err) => {
                gl::DeleteProgram(id);
                return Err(err);
            }
        };

        if position == -1 {
            gl::DeleteProgram(id);
            return Err(Error::ProgramLink(format!(
                "Attribute({:?}) is undefined in shader sources.",
                POSITION_ATTRIBUTE
            )));
        }

        if color == -1 {
            gl::DeleteProgram(id);
            return Err(Error::ProgramLink(format!(
                "Uniform({:?}) is undefined in shader sources.",
                COLOR_UNIFORM
            )));
        }

        let shader = GLShaderData {
            handle,
            id,
            params,
            position: position as GLuint,
            color,
        };

        self.shaders.create(handle, shader);
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .free(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        if self.state.binded_shader == Some(handle) {
            gl::UseProgram(0);
            self.state.binded_shader = None;
        }

        gl::DeleteProgram(shader.id);
        check()
    }

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()> {
        if data.vptr.len() != params.vertex_buffer_len() {
            return Err(Error::Backend(format!(
                "Vertex buffer of {} bytes does not match its layout ({} bytes).",
                data.vptr.len(),
                params.vertex_buffer_len()
            )));
        }

        let vbo = Self::create_buffer(gl::ARRAY_BUFFER, params.hint, &data.vptr)?;

        let ibo = match data.iptr {
            Some(ref bytes) => match Self::create_buffer(gl::ELEMENT_ARRAY_BUFFER, params.hint, bytes) {
                Ok(ibo) => Some(ibo),
                Err(err) => {
                    gl::DeleteBuffers(1, &vbo);
                    return Err(err);
                }
            },
            None => None,
        };

        self.meshes.create(
            handle,
            GLMeshData {
                handle,
                vbo,
                ibo,
                params,
            },
        );

        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mesh = self
            .meshes
            .free(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        gl::DeleteBuffers(1, &mesh.vbo);
        if let Some(ibo) = mesh.ibo {
            gl::DeleteBuffers(1, &ibo);
        }

        check()
    }

    unsafe fn update_surface_viewport(&mut self, vp: SurfaceViewport) -> Result<()> {
        if self.state.view != vp {
            let (w, h) = self.capabilities.clamp_viewport(vp.size.x, vp.size.y);
            if (w, h) != (vp.size.x, vp.size.y) {
                warn!(
                    "[GLVisitor] viewport {}x{} exceeds the maximum, clamped to {}x{}.",
                    vp.size.x, vp.size.y, w, h
                );
            }

            gl::Viewport(vp.position.x, vp.position.y, w as i32, h as i32);

            self.state.view = vp;
            check()?;
        }

        Ok(())
    }

    unsafe fn clear(&mut self, color: Color) -> Result<()> {
        gl::ClearColor(color.0, color.1, color.2, color.3);
        gl::Clear(gl::COLOR_BUFFER_BIT);
        check()
    }

    unsafe fn draw(&mut self, shader: ShaderHandle, mesh: MeshHandle, color: Color) -> Result<u32> {
        let shader = self
            .shaders
            .get(shader)
            .ok_or_else(|| Error::ShaderHandleInvalid(shader))?;

        let mesh = self
            .meshes
            .get(mesh)
            .ok_or_else(|| Error::MeshHandleInvalid(mesh))?;

        Self::bind_shader(&mut self.state, shader)?;

        gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo);
        gl::EnableVertexAttribArray(shader.position);
        gl::VertexAttribPointer(
            shader.position,
            GLint::from(mesh.params.layout.components()),
            gl::FLOAT,
            gl::FALSE,
            mesh.params.layout.stride() as GLsizei,
            ptr::null(),
        );

        gl::Uniform4f(shader.color, color.0, color.1, color.2, color.3);

        if let Some(width) = shader.params.line_width {
            gl::LineWidth(width);
        }

        let len = mesh.params.num_elements();
        let topology = mesh.params.topology;
        match mesh.ibo {
            Some(ibo) => {
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
                gl::DrawElements(
                    topology.into(),
                    len as GLsizei,
                    gl::UNSIGNED_SHORT,
                    ptr::null(),
                );
            }
            None => gl::DrawArrays(topology.into(), 0, len as GLsizei),
        }

        gl::DisableVertexAttribArray(shader.position);
        check()?;

        trace!(
            "[GLVisitor] draws {:?} with {:?} ({} elements).",
            mesh.handle,
            shader.handle,
            len
        );

        Ok(topology.assemble(len as u32))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        gl::Finish();
        check()
    }
}

impl GLVisitor {
    unsafe fn bind_shader(state: &mut GLMutableState, shader: &GLShaderData) -> Result<()> {
        if state.binded_shader == Some(shader.handle) {
            return Ok(());
        }

        gl::UseProgram(shader.id);
        check()?;

        if let Some(size) = shader.params.point_size {
            trace!("[GLVisitor] {:?} writes gl_PointSize = {}.", shader.handle, size);
        }

        state.binded_shader = Some(shader.handle);
        Ok(())
    }

    unsafe fn compile(stage: ShaderStage, src: &str) -> Result<GLuint> {
        let tp = match stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        };

        let shader = gl::CreateShader(tp);
        let c_str = CString::new(src.as_bytes())
            .map_err(|_| Error::ShaderCompile(stage, "source contains a nul byte".into()))?;

        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        // Get the compile status
        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                len,
                ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );

            gl::DeleteShader(shader);
            Err(Error::ShaderCompile(stage, info_log(buf)))
        } else {
            Ok(shader)
        }
    }

    unsafe fn link(shaders: &[GLuint]) -> Result<GLuint> {
        let program = gl::CreateProgram();
        for shader in shaders {
            gl::AttachShader(program, *shader)
        }

        gl::LinkProgram(program);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                program,
                len,
                ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );

            gl::DeleteProgram(program);
            Err(Error::ProgramLink(info_log(buf)))
        } else {
            Ok(program)
        }
    }

    unsafe fn create_buffer(tp: GLenum, hint: MeshHint, data: &[u8]) -> Result<GLuint> {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            return Err(Error::Backend("[GL] Failed to generate buffer object.".into()));
        }

        gl::BindBuffer(tp, id);

        let value = if data.is_empty() {
            ptr::null()
        } else {
            data.as_ptr() as *const c_void
        };

        gl::BufferData(tp, data.len() as GLsizeiptr, value, hint.into());
        if let Err(err) = check() {
            gl::DeleteBuffers(1, &id);
            return Err(err);
        }

        Ok(id)
    }
}

fn c_string(name: &str) -> Result<CString> {
    CString::new(name).map_err(|_| Error::Backend(format!("{:?} contains a nul byte.", name)))
}

fn info_log(mut buf: Vec<u8>) -> String {
    while buf.last() == Some(&0) {
        buf.pop();
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn check_capabilities(caps: &Capabilities) -> Result<()> {
    let exts = &caps.extensions;
    match caps.version {
        // ES 1.x is fixed-function only.
        Version::ES(major, _) if major < 2 => {
            Err(Error::Requirement("OpenGL ES 2.0".into()))
        }
        Version::ES(_, _) => Ok(()),
        v @ Version::GL(_, _) => {
            if v < Version::GL(1, 5) && !exts.gl_arb_vertex_buffer_object {
                return Err(Error::Requirement("vertex buffer objects".into()));
            }

            if v < Version::GL(2, 0)
                && (!exts.gl_arb_shader_objects
                    || !exts.gl_arb_vertex_shader
                    || !exts.gl_arb_fragment_shader)
            {
                return Err(Error::Requirement("shader objects".into()));
            }

            Ok(())
        }
    }
}

unsafe fn check() -> Result<()> {
    let msg = match gl::GetError() {
        gl::NO_ERROR => return Ok(()),
        gl::INVALID_ENUM => "[GL] An unacceptable value is specified for an enumerated argument.",
        gl::INVALID_VALUE => "[GL] A numeric argument is out of range.",
        gl::INVALID_OPERATION => {
            "[GL] The specified operation is not allowed in the current state."
        }
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        }
        gl::OUT_OF_MEMORY => "[GL] There is not enough memory left to execute the command.",
        _ => "[GL] Oops, Unknown OpenGL error.",
    };

    Err(Error::Backend(msg.into()))
}

#[cfg(test)]
mod test {
    use super::super::capabilities::Extensions;
    use super::*;

    fn capabilities(version: Version, extensions: Extensions) -> Capabilities {
        Capabilities {
            version,
            vendor: String::new(),
            renderer: String::new(),
            extensions,
            max_viewport_dims: (0, 0),
        }
    }

    fn rejects(version: Version, extensions: Extensions) -> bool {
        match check_capabilities(&capabilities(version, extensions)) {
            Err(Error::Requirement(_)) => true,
            Ok(()) => false,
            Err(err) => panic!("unexpected {:?}", err),
        }
    }

    #[test]
    fn embedded_versions() {
        assert!(rejects(Version::ES(1, 0), Extensions::default()));
        assert!(rejects(Version::ES(1, 1), Extensions::default()));
        assert!(!rejects(Version::ES(2, 0), Extensions::default()));
        assert!(!rejects(Version::ES(3, 2), Extensions::default()));
    }

    #[test]
    fn desktop_versions() {
        assert!(!rejects(Version::GL(2, 0), Extensions::default()));
        assert!(!rejects(Version::GL(4, 6), Extensions::default()));
        assert!(rejects(Version::GL(1, 4), Extensions::default()));
        assert!(rejects(Version::GL(1, 5), Extensions::default()));

        let exts = Extensions::from_names(vec![
            "GL_ARB_vertex_buffer_object",
            "GL_ARB_shader_objects",
            "GL_ARB_vertex_shader",
            "GL_ARB_fragment_shader",
        ]);
        assert!(!rejects(Version::GL(1, 4), exts));
    }
}
