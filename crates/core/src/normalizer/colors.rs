use serde::{Deserialize, Serialize};

/// Premium white flag as the production system spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PremiumWhite {
    Y,
    N,
}

impl From<bool> for PremiumWhite {
    fn from(value: bool) -> Self {
        if value {
            Self::Y
        } else {
            Self::N
        }
    }
}

/// `Y` when any color name mentions white, case-insensitively.
pub fn has_white<S: AsRef<str>>(colors: &[S]) -> PremiumWhite {
    colors
        .iter()
        .any(|c| c.as_ref().to_lowercase().contains("white"))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_white() {
        assert_eq!(has_white(&["Pantone Red", "White 205"]), PremiumWhite::Y);
        assert_eq!(has_white(&["Black"]), PremiumWhite::N);
        assert_eq!(has_white(&["OPAQUE WHITE"]), PremiumWhite::Y);
        assert_eq!(has_white::<&str>(&[]), PremiumWhite::N);
    }

    #[test]
    fn test_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&PremiumWhite::Y).unwrap(), "\"Y\"");
    }
}
