//! The eight built-in shapes and the pure functions generating their vertices.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{Geometry, GeometryError, Topology};
use crate::utils::Color;

/// Coordinates of the single point, `(x, y, z)`.
pub const POINT_COORDS: [f32; 3] = [0.5, 0.5, 0.0];

/// Coordinates of the single line segment, `(x, y)` per vertex.
pub const LINE_COORDS: [f32; 4] = [-0.5, -0.25, -0.75, -0.75];

/// Coordinates of the single triangle: top, bottom-left, bottom-right.
pub const TRIANGLE_COORDS: [f32; 9] = [
    -0.5, 0.75, 0.0, //
    -0.75, 0.25, 0.0, //
    -0.25, 0.25, 0.0,
];

/// Corners of the square: top-left, bottom-left, bottom-right, top-right.
pub const SQUARE_COORDS: [f32; 12] = [
    0.25, 0.75, 0.0, //
    0.25, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    1.0, 0.75, 0.0,
];

/// Two triangles sharing the (0, 2) diagonal.
pub const SQUARE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Sample data used by the default scene for the multi-shape variants.
pub const SAMPLE_POINTS: [f32; 9] = [
    -0.25, 0.75, 0.0, //
    0.25, 0.75, 0.0, //
    -0.5, -0.25, 0.0,
];

pub const SAMPLE_LINES: [f32; 8] = [
    -0.5, 0.5, //
    0.5, 0.5, //
    -0.5, -0.3, //
    -0.5, -0.7,
];

pub const SAMPLE_TRIANGLES: [f32; 18] = [
    -0.75, 0.10, 0.0, //
    -0.75, 0.90, 0.0, //
    -0.25, 0.90, 0.0, //
    -0.25, 0.90, 0.0, //
    -0.75, 0.10, 0.0, //
    -0.25, 0.10, 0.0,
];

pub fn point() -> Result<Geometry, GeometryError> {
    Geometry::new(POINT_COORDS.to_vec(), 3, Topology::Points, None)
}

/// Any number of points from a flat coordinate array.
pub fn points(coords: Vec<f32>, components: u8) -> Result<Geometry, GeometryError> {
    Geometry::new(coords, components, Topology::Points, None)
}

pub fn line() -> Result<Geometry, GeometryError> {
    Geometry::new(LINE_COORDS.to_vec(), 2, Topology::Lines, None)
}

/// Independent segments, every two vertices make one line.
pub fn lines(coords: Vec<f32>, components: u8) -> Result<Geometry, GeometryError> {
    Geometry::new(coords, components, Topology::Lines, None)
}

pub fn triangle() -> Result<Geometry, GeometryError> {
    Geometry::new(TRIANGLE_COORDS.to_vec(), 3, Topology::Triangles, None)
}

/// Independent triangles, every three vertices make one triangle.
pub fn triangles(coords: Vec<f32>, components: u8) -> Result<Geometry, GeometryError> {
    Geometry::new(coords, components, Topology::Triangles, None)
}

pub fn square() -> Result<Geometry, GeometryError> {
    Geometry::new(
        SQUARE_COORDS.to_vec(),
        3,
        Topology::IndexedTriangles,
        SQUARE_INDICES.to_vec(),
    )
}

/// Generates a disk centred at the origin as a triangle fan.
///
/// The fan holds `num_points + 1` vertices: the centre, then `num_points` rim
/// vertices evenly spread over a full turn. The first rim vertex is `(radius, 0, 0)`
/// and the last one repeats it, so the fan closes without a seam.
///
/// `num_points` rim vertices span `num_points - 1` segments. With the minimum of 3
/// the rim is only `(radius, 0)` and `(-radius, 0)`, and both triangles of the fan
/// have zero area, so nothing is rasterized. A visible disk needs at least 4.
pub fn circle(radius: f32, num_points: u32) -> Result<Geometry, GeometryError> {
    if num_points < 3 {
        return Err(GeometryError::TooFewPoints(num_points));
    }

    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::InvalidRadius(radius));
    }

    let segments = num_points - 1;
    let step = 2.0 * PI / f64::from(segments);
    let radius = f64::from(radius);

    let mut coords = Vec::with_capacity((num_points as usize + 1) * 3);
    coords.extend_from_slice(&[0.0, 0.0, 0.0]);

    for i in 0..segments {
        let angle = step * f64::from(i);
        coords.push((radius * angle.cos()) as f32);
        coords.push((radius * angle.sin()) as f32);
        coords.push(0.0);
    }

    let (x, y) = (coords[3], coords[4]);
    coords.extend_from_slice(&[x, y, 0.0]);

    Geometry::new(coords, 3, Topology::TriangleFan, None)
}

fn three() -> u8 {
    3
}

fn two() -> u8 {
    2
}

/// Serializable description of one of the built-in shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Point,
    Points {
        coords: Vec<f32>,
        #[serde(default = "three")]
        components: u8,
    },
    Line,
    Lines {
        coords: Vec<f32>,
        #[serde(default = "two")]
        components: u8,
    },
    Triangle,
    Triangles {
        coords: Vec<f32>,
        #[serde(default = "three")]
        components: u8,
    },
    Square,
    Circle {
        radius: f32,
        num_points: u32,
    },
}

impl Shape {
    /// Points in 3D space.
    pub fn points(coords: Vec<f32>) -> Self {
        Shape::Points {
            coords,
            components: 3,
        }
    }

    /// Segments in the 2D plane.
    pub fn lines(coords: Vec<f32>) -> Self {
        Shape::Lines {
            coords,
            components: 2,
        }
    }

    /// Triangles in 3D space.
    pub fn triangles(coords: Vec<f32>) -> Self {
        Shape::Triangles {
            coords,
            components: 3,
        }
    }

    pub fn circle(radius: f32, num_points: u32) -> Self {
        Shape::Circle { radius, num_points }
    }

    /// A short lowercase name of the shape kind.
    pub fn kind(&self) -> &'static str {
        match *self {
            Shape::Point => "point",
            Shape::Points { .. } => "points",
            Shape::Line => "line",
            Shape::Lines { .. } => "lines",
            Shape::Triangle => "triangle",
            Shape::Triangles { .. } => "triangles",
            Shape::Square => "square",
            Shape::Circle { .. } => "circle",
        }
    }

    /// Generates and validates the vertices of this shape.
    pub fn geometry(&self) -> Result<Geometry, GeometryError> {
        match *self {
            Shape::Point => point(),
            Shape::Points {
                ref coords,
                components,
            } => points(coords.clone(), components),
            Shape::Line => line(),
            Shape::Lines {
                ref coords,
                components,
            } => lines(coords.clone(), components),
            Shape::Triangle => triangle(),
            Shape::Triangles {
                ref coords,
                components,
            } => triangles(coords.clone(), components),
            Shape::Square => square(),
            Shape::Circle { radius, num_points } => circle(radius, num_points),
        }
    }

    pub fn default_color(&self) -> Color {
        match *self {
            Shape::Point => Color::red(),
            Shape::Line => Color::green(),
            Shape::Square | Shape::Circle { .. } => Color::teal(),
            _ => Color::black(),
        }
    }

    /// The `gl_PointSize` written by the vertex stage, if any.
    pub fn point_size(&self) -> Option<f32> {
        match *self {
            Shape::Point | Shape::Square | Shape::Circle { .. } => Some(50.0),
            Shape::Points { .. } => Some(100.0),
            _ => None,
        }
    }

    /// The width in pixels segments are rasterized with, if any.
    pub fn line_width(&self) -> Option<f32> {
        match *self {
            Shape::Line | Shape::Lines { .. } => Some(10.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_shapes() {
        assert_eq!(point().unwrap().num_vertices(), 1);
        assert_eq!(line().unwrap().num_vertices(), 2);
        assert_eq!(line().unwrap().layout().components(), 2);
        assert_eq!(triangle().unwrap().num_primitives(), 1);

        let sq = square().unwrap();
        assert_eq!(sq.num_vertices(), 4);
        assert_eq!(sq.num_elements(), 6);
        assert_eq!(sq.num_primitives(), 2);
    }

    #[test]
    fn circle_rejects_degenerate_input() {
        assert_eq!(circle(0.5, 2), Err(GeometryError::TooFewPoints(2)));
        assert_eq!(circle(0.0, 25), Err(GeometryError::InvalidRadius(0.0)));
        assert!(circle(::std::f32::INFINITY, 25).is_err());
    }

    #[test]
    fn smallest_circle_is_flat() {
        let g = circle(0.5, 3).unwrap();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_primitives(), 2);
        assert!(g.vertices().chunks(3).all(|v| v[1].abs() < 1e-6));

        let g = circle(0.5, 4).unwrap();
        assert!(g.vertices().chunks(3).any(|v| v[1].abs() > 0.25));
    }

    #[test]
    fn circle_closes_exactly() {
        let g = circle(1.0, 8).unwrap();
        assert_eq!(g.vertex(8), g.vertex(1));
    }

    #[test]
    fn serde_tags() {
        let shape: Shape =
            serde_json::from_str(r#"{ "shape": "circle", "radius": 0.5, "num_points": 25 }"#)
                .unwrap();
        assert_eq!(shape, Shape::circle(0.5, 25));

        let shape: Shape =
            serde_json::from_str(r#"{ "shape": "lines", "coords": [0, 0, 1, 1] }"#).unwrap();
        assert_eq!(shape, Shape::lines(vec![0.0, 0.0, 1.0, 1.0]));

        let json = serde_json::to_string(&Shape::Square).unwrap();
        assert_eq!(json, r#"{"shape":"square"}"#);
    }

    #[test]
    fn appearance() {
        assert_eq!(Shape::Point.default_color(), Color::red());
        assert_eq!(Shape::Line.default_color(), Color::green());
        assert_eq!(Shape::Square.default_color(), Color::teal());
        assert_eq!(Shape::Triangle.default_color(), Color::black());
        assert_eq!(Shape::points(vec![]).point_size(), Some(100.0));
        assert_eq!(Shape::Triangle.point_size(), None);
        assert_eq!(Shape::Line.line_width(), Some(10.0));
        assert_eq!(Shape::lines(vec![]).line_width(), Some(10.0));
        assert_eq!(Shape::Square.line_width(), None);
    }
}
