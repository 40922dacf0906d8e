//! Error taxonomy shared by every layer of the crate.
//!
//! All failures happen while resources are being constructed (geometry validation,
//! shader compilation, program linking, scene building). Nothing in here is expected
//! to be recovered from in the middle of a frame.

use std::fmt;

use crate::geometry::GeometryError;
use crate::video::assets::mesh::MeshHandle;
use crate::video::assets::shader::ShaderHandle;

/// The two programmable stages of the fixed pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to compile {} shader, errors: \n{}.", _0, _1)]
    ShaderCompile(ShaderStage, String),
    #[fail(display = "Failed to link program, errors: \n{}.", _0)]
    ProgramLink(String),
    #[fail(display = "Invalid geometry: {}.", _0)]
    InvalidGeometry(#[fail(cause)] GeometryError),
    #[fail(display = "{} is invalid.", _0)]
    ShaderHandleInvalid(ShaderHandle),
    #[fail(display = "{} is invalid.", _0)]
    MeshHandleInvalid(MeshHandle),
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "OpenGL implementation doesn\'t support {}.", _0)]
    Requirement(String),
    #[fail(display = "Scene: {}", _0)]
    Scene(String),
    #[fail(display = "Config: {}", _0)]
    Config(String),
    #[fail(display = "IO: {}", _0)]
    Io(String),
    #[fail(display = "Window: {}", _0)]
    Window(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<GeometryError> for Error {
    fn from(err: GeometryError) -> Error {
        Error::InvalidGeometry(err)
    }
}

impl From<::std::io::Error> for Error {
    fn from(err: ::std::io::Error) -> Error {
        Error::Io(format!("{}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Config(format!("{}", err))
    }
}
