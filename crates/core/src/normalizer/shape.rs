//! Die-cut shape and corner radius.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::metrics::UNKNOWN_SHAPES;

/// Token assumed when the order omits `shape`.
pub const DEFAULT_SHAPE_TOKEN: &str = "custom_shape";

pub const CUSTOM_SHAPE: &str = "custom_shape";
pub const RECTANGLE_ROUNDED_2MM: &str = "rectangle_sticker__2mm_rounded_corners";
pub const RECTANGLE_SQUARE_CORNERS: &str = "rectangle_sticker_90_degree_angle";
pub const CIRCLE_LABEL: &str = "circle_label";

const RECTANGLE_PREFIX: &str = "rectangle";

/// Shape vocabulary of the production system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Rectangle,
    Circle,
    Irregular,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Irregular => "Irregular",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn known_shape(token: &str) -> Option<Shape> {
    match token {
        CUSTOM_SHAPE => Some(Shape::Irregular),
        RECTANGLE_ROUNDED_2MM => Some(Shape::Rectangle),
        RECTANGLE_SQUARE_CORNERS => Some(Shape::Rectangle),
        CIRCLE_LABEL => Some(Shape::Circle),
        _ => None,
    }
}

/// Classifies a shape token. Unknown tokens become [`Shape::Irregular`].
pub fn resolve_shape(token: &str) -> Shape {
    if token.starts_with(RECTANGLE_PREFIX) {
        return Shape::Rectangle;
    }
    match known_shape(token) {
        Some(shape) => shape,
        None => {
            warn!(token = token, "Unrecognized shape, treating as irregular");
            UNKNOWN_SHAPES.inc();
            Shape::Irregular
        }
    }
}

/// Corner radius in millimeters.
pub fn resolve_radius(token: &str) -> u32 {
    match token {
        RECTANGLE_ROUNDED_2MM => 2,
        RECTANGLE_SQUARE_CORNERS => 0,
        _ => 0,
    }
}
