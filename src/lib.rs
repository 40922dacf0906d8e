//! # What is This?
//!
//! `glprims` draws static 2D/3D geometric primitives (points, lines, triangles, a
//! square and a circle) through an OpenGL ES 2.0 compatible context. Every shape
//! goes through the same `Primitive` type: a validated vertex array uploaded into an
//! immutable buffer, a pass-through program and a uniform color, drawn with one
//! draw call.
//!
//! GPU state is never ambient. Objects are created, drawn and released through an
//! explicit `RenderContext`, which can be backed by OpenGL or by a recording
//! headless backend.
//!
//! ```rust
//! use glprims::prelude::*;
//!
//! let mut ctx = RenderContext::headless();
//! let lines = Shape::lines(vec![-0.5, 0.5, 0.5, 0.5, -0.5, -0.3, -0.5, -0.7]);
//! let primitive = Primitive::from_shape(&mut ctx, &lines, None).unwrap();
//!
//! assert_eq!(primitive.vertex_count(), 4);
//! assert_eq!(primitive.draw(&mut ctx).unwrap(), 2);
//! primitive.release(&mut ctx).unwrap();
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[macro_use]
pub mod utils;
pub mod application;
pub mod errors;
pub mod geometry;
pub mod primitive;
pub mod scene;
pub mod video;

pub mod prelude;
