use serde::{Deserialize, Serialize};

/// One tap-feedback splash for the render surface. Transient: emitted,
/// animated by the surface, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SplashPoint {
    /// Horizontal tap position, in render-surface coordinates
    pub x: f32,

    /// Vertical tap position, in render-surface coordinates
    pub y: f32,
}

impl SplashPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
