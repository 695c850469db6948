//! Roll winding resolution.
//!
//! The order API describes how labels come off the roll as a token such as
//! `outer_270`. The production system wants one of eight winding codes.
//! Codes 3, 4, 7 and 8 rotate the label a quarter turn on the roll, so the
//! width and height the production system sees are swapped for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::metrics::WINDING_FALLBACKS;

/// Code used when the order carries an unknown output direction.
pub const DEFAULT_WINDING: Winding = Winding::Outer0;

/// Token assumed when the order omits `output_direction` entirely.
pub const DEFAULT_OUTPUT_DIRECTION: &str = "outer_0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindingError {
    #[error("Invalid winding code {0}: must be between 1 and 8")]
    InvalidCode(u8),
}

/// Which side of the label faces outward on the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollFace {
    Outer,
    Inner,
}

/// Canonical winding, one variant per production-system code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Winding {
    Outer180 = 1,
    Outer0 = 2,
    Outer270 = 3,
    Outer90 = 4,
    Inner180 = 5,
    Inner0 = 6,
    Inner270 = 7,
    Inner90 = 8,
}

impl Winding {
    pub const ALL: [Winding; 8] = [
        Winding::Outer180,
        Winding::Outer0,
        Winding::Outer270,
        Winding::Outer90,
        Winding::Inner180,
        Winding::Inner0,
        Winding::Inner270,
        Winding::Inner90,
    ];

    /// Looks up a recognized output-direction token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "outer_180" => Some(Self::Outer180),
            "outer_0" => Some(Self::Outer0),
            "outer_270" => Some(Self::Outer270),
            "outer_90" => Some(Self::Outer90),
            "inner_180" => Some(Self::Inner180),
            "inner_0" => Some(Self::Inner0),
            "inner_270" => Some(Self::Inner270),
            "inner_90" => Some(Self::Inner90),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Outer180 => "outer_180",
            Self::Outer0 => "outer_0",
            Self::Outer270 => "outer_270",
            Self::Outer90 => "outer_90",
            Self::Inner180 => "inner_180",
            Self::Inner0 => "inner_0",
            Self::Inner270 => "inner_270",
            Self::Inner90 => "inner_90",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn face(self) -> RollFace {
        match self {
            Self::Outer180 | Self::Outer0 | Self::Outer270 | Self::Outer90 => RollFace::Outer,
            Self::Inner180 | Self::Inner0 | Self::Inner270 | Self::Inner90 => RollFace::Inner,
        }
    }

    /// Rotation in degrees.
    pub fn rotation(self) -> u16 {
        match self {
            Self::Outer0 | Self::Inner0 => 0,
            Self::Outer90 | Self::Inner90 => 90,
            Self::Outer180 | Self::Inner180 => 180,
            Self::Outer270 | Self::Inner270 => 270,
        }
    }

    /// Whether this winding turns the label a quarter turn on the roll.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self.rotation(), 90 | 270)
    }
}

impl TryFrom<u8> for Winding {
    type Error = WindingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|w| w.code() == code)
            .ok_or(WindingError::InvalidCode(code))
    }
}

impl From<Winding> for u8 {
    fn from(winding: Winding) -> Self {
        winding.code()
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.token())
    }
}

/// Resolves an output-direction token, falling back to [`DEFAULT_WINDING`].
pub fn resolve_winding(token: &str) -> Winding {
    resolve_winding_or(token, DEFAULT_WINDING)
}

/// Resolves an output-direction token with an explicit fallback.
pub fn resolve_winding_or(token: &str, fallback: Winding) -> Winding {
    match Winding::from_token(token) {
        Some(winding) => winding,
        None => {
            warn!(
                token = token,
                fallback = fallback.code(),
                "Unrecognized output direction, using fallback winding"
            );
            WINDING_FALLBACKS.inc();
            fallback
        }
    }
}

/// Returns `(width, height)` as the production system sees them for `code`.
pub fn apply_winding<T>(width: T, height: T, code: u8) -> Result<(T, T), WindingError> {
    let winding = Winding::try_from(code)?;
    if winding.swaps_dimensions() {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}
