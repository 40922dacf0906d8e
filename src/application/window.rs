//! A desktop host built on `glutin`, driving a `Renderer` until the window closes.

use glutin::GlContext;

use crate::errors::*;
use crate::video::RenderContext;

use super::settings::WindowParams;
use super::Renderer;

/// Creates the window and its GL context, then runs `renderer` until the window
/// is closed.
pub fn run<R: Renderer>(params: &WindowParams, renderer: &mut R) -> Result<()> {
    let mut events_loop = glutin::EventsLoop::new();

    let builder = glutin::WindowBuilder::new()
        .with_title(params.title.clone())
        .with_dimensions(glutin::dpi::LogicalSize::new(
            f64::from(params.size.x),
            f64::from(params.size.y),
        ));

    let api = if params.gles {
        glutin::GlRequest::Specific(glutin::Api::OpenGlEs, (2, 0))
    } else {
        glutin::GlRequest::Latest
    };

    let context = glutin::ContextBuilder::new()
        .with_gl(api)
        .with_gl_profile(glutin::GlProfile::Compatibility)
        .with_multisampling(params.multisample)
        .with_vsync(params.vsync);

    let window = glutin::GlWindow::new(builder, context, &events_loop)
        .map_err(|err| Error::Window(format!("{}", err)))?;

    let mut ctx = unsafe {
        window
            .make_current()
            .map_err(|err| Error::Window(format!("{}", err)))?;

        RenderContext::gl(|symbol| window.get_proc_address(symbol) as *const _)?
    };

    renderer.on_context_created(&mut ctx)?;

    let mut dimensions = physical_size(&window).unwrap_or((params.size.x, params.size.y));
    window.resize(glutin::dpi::PhysicalSize::new(
        f64::from(dimensions.0),
        f64::from(dimensions.1),
    ));
    renderer.on_surface_resized(&mut ctx, dimensions.0, dimensions.1)?;

    let mut closed = false;
    while !closed {
        let mut resized = None;
        events_loop.poll_events(|event| {
            if let glutin::Event::WindowEvent { event, .. } = event {
                match event {
                    glutin::WindowEvent::CloseRequested | glutin::WindowEvent::Destroyed => {
                        closed = true
                    }
                    glutin::WindowEvent::Resized(size) => resized = Some(size),
                    _ => (),
                }
            }
        });

        if let Some(size) = resized {
            let size = size.to_physical(window.get_hidpi_factor());
            window.resize(size);

            let v = (size.width as u32, size.height as u32);
            if v != dimensions {
                dimensions = v;
                renderer.on_surface_resized(&mut ctx, v.0, v.1)?;
            }
        }

        renderer.on_draw_frame(&mut ctx)?;
        window
            .swap_buffers()
            .map_err(|err| Error::Window(format!("{}", err)))?;
    }

    info!("Window closed, releasing GPU objects.");
    renderer.on_context_destroyed(&mut ctx)
}

fn physical_size(window: &glutin::GlWindow) -> Option<(u32, u32)> {
    let size = window.get_inner_size()?;
    let size = size.to_physical(window.get_hidpi_factor());
    Some((size.width as u32, size.height as u32))
}
