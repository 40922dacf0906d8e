extern crate glprims;

use glprims::prelude::*;

#[test]
fn load() {
    let settings = Settings::load("tests/resources/settings.json").unwrap();
    assert_eq!(settings.window.title, "Squares");
    assert_eq!(settings.window.size.x, 400);
    assert!(!settings.window.vsync);
    assert!(settings.window.gles);

    let scene = &settings.scene;
    assert_eq!(scene.clear_color, Color::black());
    assert_eq!(scene.primitives.len(), 2);
    assert_eq!(
        scene.primitives[1].shape,
        Shape::Points {
            coords: vec![0.0, 0.0, 0.5, 0.5],
            components: 2,
        }
    );

    let mut ctx = RenderContext::headless();
    let mut renderer = SceneRenderer::new(settings.scene.clone());
    renderer.on_context_created(&mut ctx).unwrap();
    assert_eq!(ctx.clear_color(), Color::black());

    renderer.on_draw_frame(&mut ctx).unwrap();
    assert_eq!(ctx.frame_info().drawcalls, 2);
    assert_eq!(ctx.frame_info().primitives, 4);
}

#[test]
fn errors() {
    match Settings::load("tests/resources/_missing_.json") {
        Err(Error::Io(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match Settings::load("tests/resources/malformed.json") {
        Err(Error::Config(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}
