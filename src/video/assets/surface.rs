use cgmath::Vector2;

/// The rectangle of the default framebuffer the normalized device coordinates
/// are mapped onto.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceViewport {
    pub position: Vector2<i32>,
    pub size: Vector2<u32>,
}

impl SurfaceViewport {
    /// A viewport covering the whole surface of `width` x `height` pixels.
    pub fn full(width: u32, height: u32) -> Self {
        SurfaceViewport {
            position: Vector2::new(0, 0),
            size: Vector2::new(width, height),
        }
    }
}

impl Default for SurfaceViewport {
    fn default() -> Self {
        SurfaceViewport::full(0, 0)
    }
}
