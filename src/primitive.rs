//! A single drawable shape: validated vertices, one program and one color.

use crate::errors::*;
use crate::geometry::shapes::Shape;
use crate::geometry::Geometry;
use crate::utils::Color;
use crate::video::assets::prelude::*;
use crate::video::RenderContext;

/// The one renderable type every shape goes through. It owns a mesh and a program,
/// both living in the `RenderContext` it was created with.
#[derive(Debug)]
pub struct Primitive {
    geometry: Geometry,
    color: Color,
    shader: ShaderHandle,
    mesh: MeshHandle,
}

impl Primitive {
    /// Uploads `geometry` and builds the pass-through program. The vertex stage
    /// writes `gl_PointSize` when `point_size` is set.
    pub fn new<T>(
        ctx: &mut RenderContext,
        geometry: Geometry,
        color: Color,
        point_size: T,
    ) -> Result<Self>
    where
        T: Into<Option<f32>>,
    {
        let params = ShaderParams {
            point_size: point_size.into(),
            line_width: None,
        };

        Primitive::with_params(ctx, geometry, color, params)
    }

    /// Uploads `geometry` and builds the pass-through program for `params`.
    pub fn with_params(
        ctx: &mut RenderContext,
        geometry: Geometry,
        color: Color,
        params: ShaderParams,
    ) -> Result<Self> {
        let sources = ShaderSources::fixed(params.point_size);
        Primitive::build(ctx, geometry, color, params, &sources)
    }

    /// Like `new`, but with caller supplied GLSL. The sources must still declare the
    /// `vPosition` attribute and the `vColor` uniform.
    pub fn with_sources(
        ctx: &mut RenderContext,
        geometry: Geometry,
        color: Color,
        sources: &ShaderSources,
    ) -> Result<Self> {
        Primitive::build(ctx, geometry, color, ShaderParams::default(), sources)
    }

    /// Builds the primitive described by `shape`, painted with `color` or the
    /// default color of that shape.
    pub fn from_shape(ctx: &mut RenderContext, shape: &Shape, color: Option<Color>) -> Result<Self> {
        let geometry = shape.geometry()?;
        let color = color.unwrap_or_else(|| shape.default_color());
        let params = ShaderParams {
            point_size: shape.point_size(),
            line_width: shape.line_width(),
        };

        Primitive::with_params(ctx, geometry, color, params)
    }

    fn build(
        ctx: &mut RenderContext,
        geometry: Geometry,
        color: Color,
        params: ShaderParams,
        sources: &ShaderSources,
    ) -> Result<Self> {
        let mesh = ctx.create_mesh(&geometry)?;

        let shader = match ctx.create_shader(params, sources) {
            Ok(shader) => shader,
            Err(err) => {
                if let Err(e) = ctx.delete_mesh(mesh) {
                    warn!("Failed to release {} after shader error. {}", mesh, e);
                }

                return Err(err);
            }
        };

        if !color.is_normalized() {
            warn!("Color {:?} is clipped into [0, 1].", color);
        }

        Ok(Primitive {
            geometry,
            color: color.clip(),
            shader,
            mesh,
        })
    }

    /// Submits one draw call, and returns the number of points, segments or
    /// triangles assembled.
    #[inline]
    pub fn draw(&self, ctx: &mut RenderContext) -> Result<u32> {
        ctx.draw(self.shader, self.mesh, self.color)
    }

    /// Deletes the program and the buffers of this primitive.
    pub fn release(self, ctx: &mut RenderContext) -> Result<()> {
        let shader = ctx.delete_shader(self.shader);
        let mesh = ctx.delete_mesh(self.mesh);
        shader.and(mesh)
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.geometry.num_vertices()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    #[inline]
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::shapes;

    #[test]
    fn shape_defaults() {
        let mut ctx = RenderContext::headless();
        let prim = Primitive::from_shape(&mut ctx, &Shape::Line, None).unwrap();
        assert_eq!(prim.color(), Color::green());
        assert_eq!(prim.vertex_count(), 2);

        let prim = Primitive::from_shape(&mut ctx, &Shape::Line, Some(Color::red())).unwrap();
        assert_eq!(prim.color(), Color::red());
    }

    #[test]
    fn color_is_clipped() {
        let mut ctx = RenderContext::headless();
        let geometry = shapes::point().unwrap();
        let prim = Primitive::new(&mut ctx, geometry, Color(1.5, 0.5, -1.0, 1.0), 50.0).unwrap();
        assert_eq!(prim.color(), Color(1.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn shader_error_releases_mesh() {
        let mut ctx = RenderContext::headless();
        let sources = ShaderSources {
            vertex: "attribute vec4 vPosition;void main(){gl_Position = vPosition;}".into(),
            fragment: "void main(){gl_FragColor = vec4(1.0);}".into(),
        };

        let geometry = shapes::triangle().unwrap();
        match Primitive::with_sources(&mut ctx, geometry, Color::black(), &sources) {
            Err(Error::ProgramLink(_)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let mesh = ctx.create_mesh(&shapes::triangle().unwrap()).unwrap();
        let stale = MeshHandle::from(crate::utils::Handle::new(0, 1));
        assert!(!ctx.is_mesh_alive(stale));
        assert!(ctx.is_mesh_alive(mesh));
    }
}
