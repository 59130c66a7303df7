use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Layout area in layout units. Immutable for the lifetime of a layout
/// instance; callers supply a fresh graph to change it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let viewport = Viewport::new(800.0, 600.0);
        let center = viewport.center();
        assert_eq!(center.x, 400.0);
        assert_eq!(center.y, 300.0);
    }
}
