//! CPU-side vertex data and its validation.
//!
//! A `Geometry` is an immutable, validated flat coordinate array plus everything a
//! backend needs to assemble it into fragments: how many components make up one
//! vertex, which topology connects the vertices and, for indexed topologies, the
//! index list. Nothing in here touches the GPU.

pub mod shapes;

use byteorder::{ByteOrder, NativeEndian};
use serde::{Deserialize, Serialize};

/// Size in bytes of a single vertex component.
pub const COMPONENT_SIZE: usize = 4;

/// Why a coordinate array could not be turned into a `Geometry`.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum GeometryError {
    #[fail(display = "{} components per vertex is not supported, expects 2 or 3", _0)]
    UnsupportedComponents(u8),
    #[fail(
        display = "{} coordinates can not be grouped into vertices of {} components",
        len, components
    )]
    Misaligned { len: usize, components: u8 },
    #[fail(display = "coordinate #{} is not a finite number", _0)]
    NonFinite(usize),
    #[fail(display = "{:?} topology requires an index list", _0)]
    MissingIndices(Topology),
    #[fail(display = "{:?} topology does not take an index list", _0)]
    UnexpectedIndices(Topology),
    #[fail(display = "index {} references vertex out of range [0, {})", index, vertices)]
    IndexOutOfRange { index: u16, vertices: usize },
    #[fail(display = "{} vertices can not be addressed by 16-bit indices", _0)]
    TooManyVertices(usize),
    #[fail(display = "a circle needs at least 3 points, got {}", _0)]
    TooFewPoints(u32),
    #[fail(display = "radius {} must be a positive finite number", _0)]
    InvalidRadius(f32),
}

/// Defines how the GPU connects consecutive vertices into fragments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Separate points.
    Points,
    /// Separate line segments, two vertices each.
    Lines,
    /// Separate triangles, three vertices each.
    Triangles,
    /// A fan of triangles sharing the first vertex.
    TriangleFan,
    /// Separate triangles whose corners are picked by an index list.
    IndexedTriangles,
}

impl Topology {
    /// Returns true if drawing this topology goes through an index list.
    #[inline]
    pub fn is_indexed(self) -> bool {
        self == Topology::IndexedTriangles
    }

    /// Returns the number of fragments assembled from `elements` vertices (or
    /// indices, for indexed topologies).
    pub fn assemble(self, elements: u32) -> u32 {
        match self {
            Topology::Points => elements,
            Topology::Lines => elements / 2,
            Topology::Triangles | Topology::IndexedTriangles => elements / 3,
            Topology::TriangleFan => elements.saturating_sub(2),
        }
    }
}

/// How a single vertex looks like inside the flat coordinate array.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexLayout {
    components: u8,
}

impl VertexLayout {
    /// Creates a layout of `components` floats per vertex. Only 2D and 3D positions
    /// are supported.
    pub fn new(components: u8) -> Result<Self, GeometryError> {
        match components {
            2 | 3 => Ok(VertexLayout { components }),
            v => Err(GeometryError::UnsupportedComponents(v)),
        }
    }

    #[inline]
    pub fn components(&self) -> u8 {
        self.components
    }

    /// Byte distance between the start of consecutive vertices.
    #[inline]
    pub fn stride(&self) -> usize {
        self.components as usize * COMPONENT_SIZE
    }
}

/// Immutable and validated vertex data of one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<f32>,
    indices: Option<Vec<u16>>,
    layout: VertexLayout,
    topology: Topology,
    num_vertices: usize,
}

impl Geometry {
    /// Validates `vertices` and wraps them into a `Geometry`.
    ///
    /// The array length must be a multiple of `components`; it is never truncated.
    /// Indexed topologies require `indices`, and every index must name an existing
    /// vertex.
    pub fn new<T>(
        vertices: Vec<f32>,
        components: u8,
        topology: Topology,
        indices: T,
    ) -> Result<Self, GeometryError>
    where
        T: Into<Option<Vec<u16>>>,
    {
        let layout = VertexLayout::new(components)?;
        let indices = indices.into();

        if vertices.len() % components as usize != 0 {
            return Err(GeometryError::Misaligned {
                len: vertices.len(),
                components,
            });
        }

        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite(i));
        }

        let num_vertices = vertices.len() / components as usize;

        match (topology.is_indexed(), indices.as_ref()) {
            (true, None) => return Err(GeometryError::MissingIndices(topology)),
            (false, Some(_)) => return Err(GeometryError::UnexpectedIndices(topology)),
            (true, Some(indices)) => {
                if num_vertices > (u16::max_value() as usize + 1) {
                    return Err(GeometryError::TooManyVertices(num_vertices));
                }

                if let Some(&index) = indices.iter().find(|&&v| v as usize >= num_vertices) {
                    return Err(GeometryError::IndexOutOfRange {
                        index,
                        vertices: num_vertices,
                    });
                }
            }
            (false, None) => {}
        }

        Ok(Geometry {
            vertices,
            indices,
            layout,
            topology,
            num_vertices,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Returns the components of the `index`-th vertex.
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        if index >= self.num_vertices {
            return None;
        }

        let n = self.layout.components() as usize;
        Some(&self.vertices[index * n..(index + 1) * n])
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u16]> {
        self.indices.as_ref().map(|v| v.as_slice())
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// The number of elements submitted by a draw call: indices for indexed
    /// topologies, vertices otherwise.
    #[inline]
    pub fn num_elements(&self) -> usize {
        match self.indices {
            Some(ref v) => v.len(),
            None => self.num_vertices,
        }
    }

    /// The number of points, segments or triangles this geometry assembles into.
    #[inline]
    pub fn num_primitives(&self) -> u32 {
        self.topology.assemble(self.num_elements() as u32)
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Packs the vertices into native byte order, ready to be uploaded.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.vertices.len() * COMPONENT_SIZE];
        NativeEndian::write_f32_into(&self.vertices, &mut bytes);
        bytes
    }

    /// Packs the indices into native byte order, ready to be uploaded.
    pub fn index_bytes(&self) -> Option<Vec<u8>> {
        self.indices.as_ref().map(|indices| {
            let mut bytes = vec![0; indices.len() * 2];
            NativeEndian::write_u16_into(indices, &mut bytes);
            bytes
        })
    }
}
