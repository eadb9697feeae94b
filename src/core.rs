use crate::error::{SceneError, SceneResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Monotonic animation-frame counter, one per rendered frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TickIndex(pub u64);

impl TickIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> SceneResult<Self> {
        if !(width.is_finite() && height.is_finite()) {
            return Err(SceneError::validation("viewport dimensions must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(SceneError::validation("viewport dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn center_y(self) -> f64 {
        self.height / 2.0
    }
}

/// Straight (non-premultiplied) RGB, the palette unit for themes and shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
}
