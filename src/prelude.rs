pub use crate::application::prelude::*;
pub use crate::errors::{Error, ShaderStage};
pub use crate::geometry::shapes::{self, Shape};
pub use crate::geometry::{Geometry, GeometryError, Topology, VertexLayout};
pub use crate::primitive::Primitive;
pub use crate::scene::{PrimitiveDescriptor, Scene, SceneDescriptor};
pub use crate::utils::Color;
pub use crate::video::prelude::*;
