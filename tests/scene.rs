extern crate glprims;
extern crate serde_json;

use glprims::prelude::*;

#[test]
fn default_scene() {
    let (mut ctx, log) = RenderContext::recording();
    let scene = Scene::build(&mut ctx, &SceneDescriptor::default()).unwrap();

    let names: Vec<_> = scene.names().collect();
    assert_eq!(
        names,
        vec!["point", "points", "line", "lines", "triangle", "triangles", "square", "circle"]
    );
    assert_eq!(scene.active(), vec!["circle"]);
    assert_eq!(scene.clear_color(), Color::white());

    log.clear();
    assert_eq!(scene.draw(&mut ctx).unwrap(), 24);

    let circle = scene.get("circle").unwrap();
    let cmds = log.take();
    assert!(cmds.contains(&Command::UniformColor(Color::teal())));
    assert!(cmds.contains(&Command::DrawArrays {
        topology: Topology::TriangleFan,
        first: 0,
        count: circle.vertex_count(),
    }));

    scene.release(&mut ctx).unwrap();
}

#[test]
fn draw_order() {
    let (mut ctx, log) = RenderContext::recording();
    let mut scene = Scene::build(&mut ctx, &SceneDescriptor::default()).unwrap();
    scene.set_active(&["line", "point"]).unwrap();

    log.clear();
    assert_eq!(scene.draw(&mut ctx).unwrap(), 2);

    let colors: Vec<_> = log
        .take()
        .into_iter()
        .filter_map(|cmd| match cmd {
            Command::UniformColor(color) => Some(color),
            _ => None,
        })
        .collect();
    assert_eq!(colors, vec![Color::green(), Color::red()]);
}

#[test]
fn undefined_names() {
    let mut desc = SceneDescriptor::default();
    desc.active = vec!["hexagon".to_owned()];

    let mut ctx = RenderContext::headless();
    match Scene::build(&mut ctx, &desc) {
        Err(Error::Scene(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let mut scene = Scene::build(&mut ctx, &SceneDescriptor::default()).unwrap();
    assert!(scene.select("hexagon").is_err());
    assert_eq!(scene.active(), vec!["circle"]);
}

#[test]
fn duplicated_names() {
    let mut desc = SceneDescriptor::default();
    desc.primitives
        .push(PrimitiveDescriptor::new("circle", Shape::circle(0.25, 8)));

    let mut ctx = RenderContext::headless();
    match Scene::build(&mut ctx, &desc) {
        Err(Error::Scene(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn invalid_primitive_releases_the_others() {
    let desc = SceneDescriptor {
        clear_color: Color::white(),
        primitives: vec![
            PrimitiveDescriptor::new("square", Shape::Square),
            PrimitiveDescriptor::new("broken", Shape::circle(0.5, 1)),
        ],
        active: vec![],
    };

    let (mut ctx, log) = RenderContext::recording();
    match Scene::build(&mut ctx, &desc) {
        Err(Error::InvalidGeometry(GeometryError::TooFewPoints(1))) => {}
        other => panic!("unexpected {:?}", other),
    }

    let cmds = log.take();
    let created = cmds
        .iter()
        .filter(|cmd| match cmd {
            Command::CreateMesh { .. } => true,
            _ => false,
        })
        .count();
    let deleted = cmds
        .iter()
        .filter(|cmd| match cmd {
            Command::DeleteMesh(_) => true,
            _ => false,
        })
        .count();

    assert_eq!(created, 1);
    assert_eq!(deleted, 1);
}

#[test]
fn descriptor_json() {
    let json = serde_json::to_string(&SceneDescriptor::default()).unwrap();
    let desc: SceneDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(desc, SceneDescriptor::default());

    let desc: SceneDescriptor = serde_json::from_str(r#"{ "active": ["square"] }"#).unwrap();
    assert_eq!(desc.primitives.len(), 8);

    let mut ctx = RenderContext::headless();
    let scene = Scene::build(&mut ctx, &desc).unwrap();
    assert_eq!(scene.draw(&mut ctx).unwrap(), 2);
}

#[test]
fn build_errors_keep_their_kind() {
    let desc = SceneDescriptor {
        clear_color: Color::white(),
        primitives: vec![
            PrimitiveDescriptor::new("point", Shape::Point),
            PrimitiveDescriptor::new("points", Shape::points(vec![0.0; 4])),
        ],
        active: vec![],
    };

    let (mut ctx, log) = RenderContext::recording();
    match Scene::build(&mut ctx, &desc) {
        Err(Error::InvalidGeometry(GeometryError::Misaligned {
            len: 4,
            components: 3,
        })) => {}
        other => panic!("unexpected {:?}", other),
    }

    let cmds = log.take();
    assert!(cmds.iter().any(|cmd| match cmd {
        Command::DeleteShader(_) => true,
        _ => false,
    }));
    assert!(cmds.iter().any(|cmd| match cmd {
        Command::DeleteMesh(_) => true,
        _ => false,
    }));
}
