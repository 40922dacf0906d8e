use std::cmp;
use std::ffi;

use gl::types::*;

use crate::errors::*;

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Obtains the OpenGL version of the current context using the loaded functions.
    ///
    /// # Unsafe
    ///
    /// You must ensure that the functions belong to the current context, otherwise you will get
    /// an undefined behavior.
    pub unsafe fn parse() -> Result<Version> {
        let desc = get_string(gl::VERSION)?;
        Version::from_description(&desc)
    }

    /// Parses a `GL_VERSION` string, e.g. `"OpenGL ES 2.0 Mesa 20.0"` or `"4.6.0 NVIDIA"`.
    pub fn from_description(desc: &str) -> Result<Version> {
        let malformed = || Error::Backend(format!("[GL] Version string {:?} is malformed.", desc));

        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            (true, desc.get(13..).ok_or_else(malformed)?)
        } else {
            (false, desc)
        };

        let desc = desc.split(' ').next().ok_or_else(malformed)?;
        let mut iter = desc.split('.');

        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

macro_rules! extensions {
    ($($string:expr => $field:ident,)+) => {
        /// Contains data about the list of extensions.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct Extensions {
            $(
                pub $field: bool,
            )+
        }

        impl Extensions {
            /// Returns the list of extensions supported by the backend.
            ///
            /// *Safety*: the OpenGL context corresponding to `gl` must be current in the thread.
            pub unsafe fn parse(version: Version) -> Result<Extensions> {
                let strings: Vec<String> =
                    if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
                        let mut num_extensions = 0;
                        gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);
                        (0..num_extensions)
                            .filter_map(|i| {
                                let ext = gl::GetStringi(gl::EXTENSIONS, i as GLuint);
                                if ext.is_null() {
                                    None
                                } else {
                                    let ext = ffi::CStr::from_ptr(ext as *const _);
                                    Some(ext.to_string_lossy().into_owned())
                                }
                            })
                            .collect()
                    } else {
                        let list = get_string(gl::EXTENSIONS)?;
                        list.split(' ').map(|e| e.to_owned()).collect()
                    };

                Ok(Extensions::from_names(strings.iter().map(|v| v.as_str())))
            }

            /// Collects the known extensions out of a list of names.
            pub fn from_names<'a, T>(names: T) -> Extensions
            where
                T: IntoIterator<Item = &'a str>,
            {
                let mut extensions = Extensions::default();
                for name in names {
                    match name {
                        $(
                            $string => extensions.$field = true,
                        )+
                        _ => (),
                    }
                }

                extensions
            }
        }
    }
}

extensions! {
    "GL_ARB_shader_objects" => gl_arb_shader_objects,
    "GL_ARB_vertex_shader" => gl_arb_vertex_shader,
    "GL_ARB_fragment_shader" => gl_arb_fragment_shader,
    "GL_ARB_vertex_buffer_object" => gl_arb_vertex_buffer_object,
}

/// Represents the capabilities of the context.
///
/// Contrary to the state, these values never change.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Returns a version or release number. Vendor-specific information may follow the version
    /// number.
    pub version: Version,

    /// The company responsible for this GL implementation.
    pub vendor: String,

    /// The name of the renderer. This name is typically specific to a particular
    /// configuration of a hardware platform.
    pub renderer: String,

    /// The list of OpenGL extensions support by this implementation.
    pub extensions: Extensions,

    /// Maximum width and height of `glViewport`.
    pub max_viewport_dims: (u32, u32),
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse()?;
        let extensions = Extensions::parse(version)?;

        Ok(Capabilities {
            version,
            extensions,
            vendor: get_string(gl::VENDOR)?,
            renderer: get_string(gl::RENDERER)?,
            max_viewport_dims: Capabilities::parse_viewport_dims(),
        })
    }

    /// Returns true if the context is a desktop one, where `gl_PointSize` is ignored
    /// unless `GL_PROGRAM_POINT_SIZE` is enabled.
    #[inline]
    pub fn is_desktop(&self) -> bool {
        match self.version {
            Version::GL(_, _) => true,
            Version::ES(_, _) => false,
        }
    }

    /// Returns true if vertex attributes can only be specified with a vertex array
    /// object bound.
    #[inline]
    pub fn requires_vertex_array(&self) -> bool {
        self.version >= Version::GL(3, 0)
    }

    /// Clamps a viewport size to `max_viewport_dims`. A zero limit means the
    /// implementation did not report one.
    pub fn clamp_viewport(&self, width: u32, height: u32) -> (u32, u32) {
        let (mw, mh) = self.max_viewport_dims;
        let clamp = |v: u32, max: u32| if max > 0 { v.min(max) } else { v };
        (clamp(width, mw), clamp(height, mh))
    }

    #[inline]
    unsafe fn parse_viewport_dims() -> (u32, u32) {
        let mut val: [GLint; 2] = [0, 0];
        gl::GetIntegerv(gl::MAX_VIEWPORT_DIMS, val.as_mut_ptr());
        (val[0] as u32, val[1] as u32)
    }
}

unsafe fn get_string(id: GLenum) -> Result<String> {
    let s = gl::GetString(id);
    if s.is_null() {
        return Err(Error::Backend(format!("[GL] String of {} is null.", id)));
    }

    String::from_utf8(ffi::CStr::from_ptr(s as *const _).to_bytes().to_vec())
        .map_err(|_| Error::Backend(format!("[GL] String of {} is malformed.", id)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version() {
        assert_eq!(
            Version::from_description("OpenGL ES 2.0 Mesa 21.2.6").unwrap(),
            Version::ES(2, 0)
        );
        assert_eq!(
            Version::from_description("4.6.0 NVIDIA 470.82").unwrap(),
            Version::GL(4, 6)
        );
        assert_eq!(
            Version::from_description("OpenGL ES-CM 1.1").unwrap(),
            Version::ES(1, 1)
        );
        assert!(Version::from_description("garbage").is_err());
    }

    #[test]
    fn ordering() {
        assert!(Version::GL(3, 3) >= Version::GL(3, 0));
        assert!(Version::ES(2, 0) < Version::ES(3, 0));
        assert!(!(Version::ES(3, 0) >= Version::GL(2, 0)));
        assert!(!(Version::GL(3, 0) >= Version::ES(2, 0)));
    }

    #[test]
    fn extensions() {
        let exts = Extensions::from_names(vec!["GL_ARB_vertex_shader", "GL_FOO_bar"]);
        assert!(exts.gl_arb_vertex_shader);
        assert!(!exts.gl_arb_fragment_shader);
    }

    #[test]
    fn viewport_limits() {
        let mut caps = Capabilities {
            version: Version::ES(2, 0),
            vendor: String::new(),
            renderer: String::new(),
            extensions: Extensions::default(),
            max_viewport_dims: (4096, 2048),
        };

        assert_eq!(caps.clamp_viewport(640, 640), (640, 640));
        assert_eq!(caps.clamp_viewport(8192, 8192), (4096, 2048));

        caps.max_viewport_dims = (0, 0);
        assert_eq!(caps.clamp_viewport(8192, 8192), (8192, 8192));
    }
}
