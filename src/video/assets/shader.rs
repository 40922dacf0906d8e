//! The fixed pass-through program every primitive is drawn with.

impl_handle!(ShaderHandle);

/// Name of the per-vertex position attribute.
pub const POSITION_ATTRIBUTE: &str = "vPosition";

/// Name of the uniform color applied to every covered pixel.
pub const COLOR_UNIFORM: &str = "vColor";

pub const FRAGMENT_SOURCE: &str = "precision mediump float;\
                                   uniform vec4 vColor;\
                                   void main(){\
                                   gl_FragColor = vColor;\
                                   }";

/// Describes what the backend has to know about a program beyond its sources.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShaderParams {
    /// The size in device units written to `gl_PointSize`, if any.
    pub point_size: Option<f32>,
    /// The rasterized width of lines, set before every draw call if any.
    pub line_width: Option<f32>,
}

/// GLSL sources of both programmable stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// The pass-through stages: the vertex stage forwards `vPosition` to clip space
    /// and optionally fixes the point size, the fragment stage emits `vColor`.
    pub fn fixed(point_size: Option<f32>) -> Self {
        let size = match point_size {
            Some(v) => format!("gl_PointSize = {:?};", v),
            None => String::new(),
        };

        ShaderSources {
            vertex: format!(
                "attribute vec4 vPosition;void main(){{gl_Position = vPosition;{}}}",
                size
            ),
            fragment: FRAGMENT_SOURCE.to_owned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_sources() {
        let sources = ShaderSources::fixed(None);
        assert_eq!(
            sources.vertex,
            "attribute vec4 vPosition;void main(){gl_Position = vPosition;}"
        );
        assert_eq!(
            sources.fragment,
            "precision mediump float;uniform vec4 vColor;void main(){gl_FragColor = vColor;}"
        );

        let sources = ShaderSources::fixed(Some(50.0));
        assert_eq!(
            sources.vertex,
            "attribute vec4 vPosition;void main(){gl_Position = vPosition;gl_PointSize = 50.0;}"
        );
    }
}
