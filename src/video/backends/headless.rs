//! A backend without GPU. It keeps the same bookkeeping as the OpenGL visitor and
//! records every call it would have issued, so the draw sequence can be inspected.

use std::cell::RefCell;
use std::rc::Rc;

use super::super::assets::prelude::*;
use super::super::assets::shader::{COLOR_UNIFORM, POSITION_ATTRIBUTE};
use super::utils::DataVec;
use super::Visitor;

use crate::errors::*;
use crate::geometry::Topology;
use crate::utils::Color;

/// One call the OpenGL visitor would have made.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    CreateMesh {
        handle: MeshHandle,
        vertex_bytes: usize,
        index_bytes: usize,
    },
    DeleteMesh(MeshHandle),
    Viewport(SurfaceViewport),
    Clear(Color),
    UseProgram(ShaderHandle),
    EnableAttribute,
    AttributePointer {
        size: u8,
        stride: usize,
        normalized: bool,
    },
    UniformColor(Color),
    LineWidth(f32),
    DrawArrays {
        topology: Topology,
        first: usize,
        count: usize,
    },
    DrawElements {
        topology: Topology,
        count: usize,
    },
    DisableAttribute,
    Flush,
}

/// A shared view of the commands recorded by a `HeadlessVisitor`. It stays valid
/// after the visitor has been boxed into a `RenderContext`.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Rc<RefCell<Vec<Command>>>);

impl CommandLog {
    /// Copies the recorded commands.
    pub fn snapshot(&self) -> Vec<Command> {
        self.0.borrow().clone()
    }

    /// Moves the recorded commands out, leaving the log empty.
    pub fn take(&self) -> Vec<Command> {
        self.0.replace(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, cmd: Command) {
        self.0.borrow_mut().push(cmd);
    }
}

#[derive(Debug, Clone)]
struct HeadlessShaderData {
    handle: ShaderHandle,
    params: ShaderParams,
}

#[derive(Debug, Clone)]
struct HeadlessMeshData {
    handle: MeshHandle,
    params: MeshParams,
}

pub struct HeadlessVisitor {
    log: CommandLog,
    shaders: DataVec<HeadlessShaderData>,
    meshes: DataVec<HeadlessMeshData>,
    view: SurfaceViewport,
    binded_shader: Option<ShaderHandle>,
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::new()
    }
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor {
            log: CommandLog::default(),
            shaders: DataVec::new(),
            meshes: DataVec::new(),
            view: SurfaceViewport::default(),
            binded_shader: None,
        }
    }

    /// Returns a handle to the commands recorded from now on.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    fn compile(stage: ShaderStage, src: &str) -> Result<()> {
        if src.contains("main") {
            Ok(())
        } else {
            Err(Error::ShaderCompile(
                stage,
                "'main' : function is not defined".into(),
            ))
        }
    }

    fn link(vs: &str, fs: &str) -> Result<()> {
        if !vs.contains(POSITION_ATTRIBUTE) {
            return Err(Error::ProgramLink(format!(
                "Attribute({:?}) is undefined in shader sources.",
                POSITION_ATTRIBUTE
            )));
        }

        if !fs.contains(COLOR_UNIFORM) {
            return Err(Error::ProgramLink(format!(
                "Uniform({:?}) is undefined in shader sources.",
                COLOR_UNIFORM
            )));
        }

        Ok(())
    }
}

impl Visitor for HeadlessVisitor {
    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        params: ShaderParams,
        vs: &str,
        fs: &str,
    ) -> Result<()> {
        Self::compile(ShaderStage::Vertex, vs)?;
        Self::compile(ShaderStage::Fragment, fs)?;
        Self::link(vs, fs)?;

        self.shaders
            .create(handle, HeadlessShaderData { handle, params });
        self.log.push(Command::CreateShader(handle));
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.shaders
            .free(handle)
            .ok_or_else(|| Error::ShaderHandleInvalid(handle))?;

        if self.binded_shader == Some(handle) {
            self.binded_shader = None;
        }

        self.log.push(Command::DeleteShader(handle));
        Ok(())
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

        let index_bytes = data.iptr.as_ref().map(|v| v.len()).unwrap_or(0);
        self.meshes.create(handle, HeadlessMeshData { handle, params });
        self.log.push(Command::CreateMesh {
            handle,
            vertex_bytes: data.vptr.len(),
            index_bytes,
        });

        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        self.meshes
            .free(handle)
            .ok_or_else(|| Error::MeshHandleInvalid(handle))?;

        self.log.push(Command::DeleteMesh(handle));
        Ok(())
    }

    unsafe fn update_surface_viewport(&mut self, vp: SurfaceViewport) -> Result<()> {
        if self.view != vp {
            self.view = vp;
            self.log.push(Command::Viewport(vp));
        }

        Ok(())
    }

    unsafe fn clear(&mut self, color: Color) -> Result<()> {
        self.log.push(Command::Clear(color));
        Ok(())
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

        if self.binded_shader != Some(shader.handle) {
            self.binded_shader = Some(shader.handle);
            self.log.push(Command::UseProgram(shader.handle));
        }

        let layout = mesh.params.layout;
        self.log.push(Command::EnableAttribute);
        self.log.push(Command::AttributePointer {
            size: layout.components(),
            stride: layout.stride(),
            normalized: false,
        });
        self.log.push(Command::UniformColor(color));

        if let Some(width) = shader.params.line_width {
            self.log.push(Command::LineWidth(width));
        }

        let count = mesh.params.num_elements();
        let topology = mesh.params.topology;
        if topology.is_indexed() {
            self.log.push(Command::DrawElements { topology, count });
        } else {
            self.log.push(Command::DrawArrays {
                topology,
                first: 0,
                count,
            });
        }

        self.log.push(Command::DisableAttribute);

        trace!(
            "[HeadlessVisitor] draws {:?} with {:?} (point size {:?}).",
            mesh.handle,
            shader.handle,
            shader.params.point_size
        );

        Ok(topology.assemble(count as u32))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        self.log.push(Command::Flush);
        Ok(())
    }
}
