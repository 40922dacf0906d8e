//! Opens a window and draws the active primitives of a scene.
//!
//! ```sh
//! cargo run --features window --bin viewer -- [settings.json]
//! ```

#[macro_use]
extern crate log;

use std::env;
use std::process;

use glprims::application::{self, window};
use glprims::prelude::*;

fn main() {
    application::init_logging();

    let settings = match env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                error!("{}", err);
                process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut renderer = SceneRenderer::new(settings.scene.clone());
    if let Err(err) = window::run(&settings.window, &mut renderer) {
        error!("{}", err);
        process::exit(1);
    }
}
