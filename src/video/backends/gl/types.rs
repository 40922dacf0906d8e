use gl::types::*;

use crate::geometry::Topology;

use super::super::super::assets::prelude::*;

impl From<MeshHint> for GLenum {
    fn from(hint: MeshHint) -> Self {
        match hint {
            MeshHint::Immutable => gl::STATIC_DRAW,
        }
    }
}

impl From<Topology> for GLenum {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::Points => gl::POINTS,
            Topology::Lines => gl::LINES,
            Topology::Triangles | Topology::IndexedTriangles => gl::TRIANGLES,
            Topology::TriangleFan => gl::TRIANGLE_FAN,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn topology() {
        assert_eq!(GLenum::from(Topology::TriangleFan), gl::TRIANGLE_FAN);
        assert_eq!(GLenum::from(Topology::IndexedTriangles), gl::TRIANGLES);
        assert_eq!(GLenum::from(Topology::Points), gl::POINTS);
    }
}
