use serde::{Deserialize, Serialize};

/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
///
/// Serialized as a plain `[r, g, b, a]` array.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Into<[f32; 4]> for Color {
    fn into(self) -> [f32; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Color(v[0], v[1], v[2], v[3])
    }
}

impl Color {
    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Color {
        Color(
            clamp(self.0, 0.0, 1.0),
            clamp(self.1, 0.0, 1.0),
            clamp(self.2, 0.0, 1.0),
            clamp(self.3, 0.0, 1.0),
        )
    }

    /// Returns true if every component already lies in [0.0, 1.0].
    pub fn is_normalized(&self) -> bool {
        self.clip() == *self
    }
}

impl Color {
    pub fn white() -> Self {
        Color(1.0, 1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        Color(0.0, 0.0, 0.0, 1.0)
    }

    pub fn red() -> Self {
        Color(1.0, 0.0, 0.0, 1.0)
    }

    pub fn green() -> Self {
        Color(0.0, 1.0, 0.0, 1.0)
    }

    /// The dark teal used by the filled shapes, `(0.0, 0.25, 0.25, 1.0)`.
    pub fn teal() -> Self {
        Color(0.0, 0.25, 0.25, 1.0)
    }
}

fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v.is_nan() {
        return min;
    }

    let mut v = v;

    if v < min {
        v = min;
    }

    if v > max {
        v = max;
    }

    v
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clip() {
        let c = Color(1.5, -0.5, 0.5, 1.0);
        assert_eq!(c.clip(), Color(1.0, 0.0, 0.5, 1.0));
        assert!(!c.is_normalized());
        assert!(Color::teal().is_normalized());
    }

    #[test]
    fn json() {
        let c: Color = serde_json::from_str("[0.0, 0.25, 0.25, 1.0]").unwrap();
        assert_eq!(c, Color::teal());

        let v: [f32; 4] = c.into();
        assert_eq!(v, [0.0, 0.25, 0.25, 1.0]);
    }
}
