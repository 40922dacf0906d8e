pub mod mesh;
pub mod shader;
pub mod surface;

pub mod prelude {
    pub use super::mesh::{MeshData, MeshHandle, MeshHint, MeshParams};
    pub use super::shader::{ShaderHandle, ShaderParams, ShaderSources};
    pub use super::surface::SurfaceViewport;
}
