//! Immutable vertex and index data uploaded to the GPU.

use crate::geometry::{Geometry, Topology, VertexLayout};

impl_handle!(MeshHandle);

/// Hint abouts the intended update strategy of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MeshHint {
    /// The resource is initialized with data and cannot be changed later, this
    /// is the most common and most efficient usage.
    Immutable,
}

/// The setup parameters of mesh object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshParams {
    /// Usage hints.
    pub hint: MeshHint,
    /// How a single vertex structure looks like.
    pub layout: VertexLayout,
    /// How the input vertex data is used to assemble primitives.
    pub topology: Topology,
    /// The number of vertices in this mesh.
    pub num_verts: usize,
    /// The number of indices in this mesh, zero for non-indexed topologies.
    pub num_idxes: usize,
}

impl MeshParams {
    #[inline]
    pub fn vertex_buffer_len(&self) -> usize {
        self.num_verts * self.layout.stride()
    }

    #[inline]
    pub fn index_buffer_len(&self) -> usize {
        self.num_idxes * 2
    }

    /// The number of elements passed to the draw call.
    #[inline]
    pub fn num_elements(&self) -> usize {
        if self.topology.is_indexed() {
            self.num_idxes
        } else {
            self.num_verts
        }
    }
}

/// Packed bytes in native order.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vptr: Vec<u8>,
    pub iptr: Option<Vec<u8>>,
}

impl<'a> From<&'a Geometry> for MeshParams {
    fn from(geometry: &'a Geometry) -> Self {
        MeshParams {
            hint: MeshHint::Immutable,
            layout: geometry.layout(),
            topology: geometry.topology(),
            num_verts: geometry.num_vertices(),
            num_idxes: geometry.indices().map(|v| v.len()).unwrap_or(0),
        }
    }
}

impl<'a> From<&'a Geometry> for MeshData {
    fn from(geometry: &'a Geometry) -> Self {
        MeshData {
            vptr: geometry.vertex_bytes(),
            iptr: geometry.index_bytes(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::shapes;

    #[test]
    fn from_geometry() {
        let square = shapes::square().unwrap();
        let params = MeshParams::from(&square);
        assert_eq!(params.vertex_buffer_len(), 48);
        assert_eq!(params.index_buffer_len(), 12);
        assert_eq!(params.num_elements(), 6);

        let data = MeshData::from(&square);
        assert_eq!(data.vptr.len(), params.vertex_buffer_len());
        assert_eq!(data.iptr.map(|v| v.len()), Some(12));

        let line = shapes::line().unwrap();
        let params = MeshParams::from(&line);
        assert_eq!(params.num_elements(), 2);
        assert_eq!(params.index_buffer_len(), 0);
    }
}
