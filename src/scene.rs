//! Which primitives exist, and which of them are drawn every frame.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::geometry::shapes::{self, Shape};
use crate::primitive::Primitive;
use crate::utils::Color;
use crate::video::RenderContext;

/// A named shape, optionally painted with something else than its default color.
///
/// In JSON the shape fields sit next to the name:
/// `{ "name": "disk", "shape": "circle", "radius": 0.5, "num_points": 25 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PrimitiveDescriptor {
    pub fn new<T: Into<String>>(name: T, shape: Shape) -> Self {
        PrimitiveDescriptor {
            name: name.into(),
            shape,
            color: None,
        }
    }
}

/// The configuration of a `Scene`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescriptor {
    pub clear_color: Color,
    pub primitives: Vec<PrimitiveDescriptor>,
    pub active: Vec<String>,
}

impl Default for SceneDescriptor {
    fn default() -> Self {
        let primitives = vec![
            PrimitiveDescriptor::new("point", Shape::Point),
            PrimitiveDescriptor::new("points", Shape::points(shapes::SAMPLE_POINTS.to_vec())),
            PrimitiveDescriptor::new("line", Shape::Line),
            PrimitiveDescriptor::new("lines", Shape::lines(shapes::SAMPLE_LINES.to_vec())),
            PrimitiveDescriptor::new("triangle", Shape::Triangle),
            PrimitiveDescriptor::new(
                "triangles",
                Shape::triangles(shapes::SAMPLE_TRIANGLES.to_vec()),
            ),
            PrimitiveDescriptor::new("square", Shape::Square),
            PrimitiveDescriptor::new("circle", Shape::circle(0.5, 25)),
        ];

        SceneDescriptor {
            clear_color: Color::white(),
            primitives,
            active: vec!["circle".to_owned()],
        }
    }
}

/// The primitives built out of a `SceneDescriptor`, drawn in the order of the
/// active selection.
#[derive(Debug)]
pub struct Scene {
    clear_color: Color,
    names: Vec<String>,
    primitives: Vec<Primitive>,
    active: Vec<usize>,
}

impl Scene {
    /// Builds every primitive of `descriptor`. Primitives built before a failing one
    /// are released, and the error of the failing one is returned as is.
    pub fn build(ctx: &mut RenderContext, descriptor: &SceneDescriptor) -> Result<Self> {
        let mut names = HashSet::new();
        for v in &descriptor.primitives {
            if !names.insert(v.name.as_str()) {
                return Err(Error::Scene(format!("Duplicated primitive {:?}.", v.name)));
            }
        }

        let mut scene = Scene {
            clear_color: descriptor.clear_color,
            names: Vec::with_capacity(descriptor.primitives.len()),
            primitives: Vec::with_capacity(descriptor.primitives.len()),
            active: Vec::new(),
        };

        for v in &descriptor.primitives {
            match Primitive::from_shape(ctx, &v.shape, v.color) {
                Ok(primitive) => {
                    debug!(
                        "[Scene] builds {:?} as {} with {} vertices.",
                        v.name,
                        v.shape.kind(),
                        primitive.vertex_count()
                    );

                    scene.names.push(v.name.clone());
                    scene.primitives.push(primitive);
                }
                Err(err) => {
                    warn!("[Scene] failed to build primitive {:?}. {}", v.name, err);
                    scene.discard(ctx);
                    return Err(err);
                }
            }
        }

        if let Err(err) = scene.set_active(&descriptor.active) {
            scene.discard(ctx);
            return Err(err);
        }

        info!(
            "[Scene] built {} primitives, {:?} active.",
            scene.primitives.len(),
            descriptor.active
        );

        Ok(scene)
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Names of all the primitives, in build order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|v| v.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Primitive> {
        self.position(name).map(|i| &self.primitives[i])
    }

    /// Makes `name` the only active primitive.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let index = self.lookup(name)?;
        self.active = vec![index];
        info!("[Scene] selects {:?}.", name);
        Ok(())
    }

    /// Replaces the active primitives. Nothing changes if any of the names is
    /// unknown.
    pub fn set_active<T: AsRef<str>>(&mut self, names: &[T]) -> Result<()> {
        let mut active = Vec::with_capacity(names.len());
        for name in names {
            active.push(self.lookup(name.as_ref())?);
        }

        self.active = active;
        Ok(())
    }

    /// Names of the active primitives, in drawing order.
    pub fn active(&self) -> Vec<&str> {
        self.active.iter().map(|&i| self.names[i].as_str()).collect()
    }

    /// Draws the active primitives in order, and returns the number of points,
    /// segments and triangles assembled.
    pub fn draw(&self, ctx: &mut RenderContext) -> Result<u32> {
        let mut primitives = 0;
        for &i in &self.active {
            primitives += self.primitives[i].draw(ctx)?;
        }

        Ok(primitives)
    }

    // Failures while unwinding a partial build are already logged by `release`.
    fn discard(self, ctx: &mut RenderContext) {
        let _ = self.release(ctx);
    }

    /// Releases the GPU objects of every primitive.
    pub fn release(self, ctx: &mut RenderContext) -> Result<()> {
        let mut result = Ok(());
        for (name, primitive) in self.names.iter().zip(self.primitives) {
            if let Err(err) = primitive.release(ctx) {
                warn!("[Scene] failed to release {:?}. {}", name, err);
                result = Err(err);
            }
        }

        result
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|v| v == name)
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| Error::Scene(format!("Undefined primitive {:?}.", name)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_scene() {
        let desc = SceneDescriptor::default();
        assert_eq!(desc.primitives.len(), 8);
        assert_eq!(desc.clear_color, Color::white());

        let mut ctx = RenderContext::headless();
        let scene = Scene::build(&mut ctx, &desc).unwrap();
        assert_eq!(scene.len(), 8);
        assert_eq!(scene.active(), vec!["circle"]);
        assert_eq!(scene.get("circle").unwrap().vertex_count(), 26);
        assert_eq!(scene.draw(&mut ctx).unwrap(), 24);
    }

    #[test]
    fn selection() {
        let mut ctx = RenderContext::headless();
        let mut scene = Scene::build(&mut ctx, &SceneDescriptor::default()).unwrap();

        scene.select("lines").unwrap();
        assert_eq!(scene.draw(&mut ctx).unwrap(), 2);

        scene.set_active(&["square", "triangle"]).unwrap();
        assert_eq!(scene.active(), vec!["square", "triangle"]);
        assert_eq!(scene.draw(&mut ctx).unwrap(), 3);

        assert!(scene.select("hexagon").is_err());
        assert!(scene.set_active(&["square", "hexagon"]).is_err());
        assert_eq!(scene.active(), vec!["square", "triangle"]);
    }

    #[test]
    fn json() {
        let json = r#"{
            "clear_color": [0.0, 0.0, 0.0, 1.0],
            "primitives": [
                { "name": "disk", "shape": "circle", "radius": 0.25, "num_points": 12 },
                { "name": "dot", "shape": "point", "color": [0.0, 0.0, 1.0, 1.0] }
            ],
            "active": ["dot", "disk"]
        }"#;

        let desc: SceneDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.primitives[0].shape, Shape::circle(0.25, 12));
        assert_eq!(desc.primitives[1].color, Some(Color(0.0, 0.0, 1.0, 1.0)));

        let back: SceneDescriptor =
            serde_json::from_str(&serde_json::to_string(&desc).unwrap()).unwrap();
        assert_eq!(back, desc);
    }
}
