//! Functions for loading viewer settings.

use std::fs;
use std::path::Path;

use cgmath::Vector2;
use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::scene::SceneDescriptor;

/// A structure containing configuration data for the viewer, which are used to
/// create the window and to describe what is drawn inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowParams,
    pub scene: SceneDescriptor,
}

impl Settings {
    /// Reads settings from a JSON file. Missing fields take their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|err| Error::Io(format!("Failed to read {}. {}", path.display(), err)))?;

        let settings = serde_json::from_slice(&bytes)?;
        info!("Loads settings from {}.", path.display());
        Ok(settings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// Sets the multisampling level to request. A value of 0 indicates that
    /// multisampling must not be enabled.
    pub multisample: u16,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
    /// Requests an OpenGL ES 2.0 context instead of a desktop one.
    pub gles: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "Primitives".to_owned(),
            size: Vector2::new(640, 640),
            multisample: 2,
            vsync: true,
            gles: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());

        let settings: Settings =
            serde_json::from_str(r#"{ "window": { "size": { "x": 800, "y": 600 }, "gles": false } }"#)
                .unwrap();
        assert_eq!(settings.window.size, Vector2::new(800, 600));
        assert!(!settings.window.gles);
        assert_eq!(settings.window.multisample, 2);
        assert_eq!(settings.scene.active, vec!["circle".to_owned()]);
    }
}
