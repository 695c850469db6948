//! Types for the staging module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of artwork file attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkKind {
    /// The printable design PDF.
    Design,
    /// The production jobsheet.
    Jobsheet,
}

impl ArtworkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Jobsheet => "jobsheet",
        }
    }
}

impl fmt::Display for ArtworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{reference}_{index}`, shared by the design folder, its JSON and its archive.
pub fn design_stem(reference: &str, index: usize) -> String {
    format!("{}_{}", reference, index)
}

/// `{order_id}_{kind}_{index}.pdf`
pub fn artwork_file_name(order_id: &str, kind: ArtworkKind, index: usize) -> String {
    format!("{}_{}_{}.pdf", order_id, kind.as_str(), index)
}

/// `{order_id}_{index}_ex_1.pdf`
pub fn secondary_file_name(order_id: &str, index: usize) -> String {
    format!("{}_{}_ex_1.pdf", order_id, index)
}

/// A file copied to the secondary location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub size: u64,
    /// SHA-256 of the copy, when verification is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(design_stem("PC-123456", 2), "PC-123456_2");
        assert_eq!(
            artwork_file_name("998877", ArtworkKind::Design, 1),
            "998877_design_1.pdf"
        );
        assert_eq!(
            artwork_file_name("998877", ArtworkKind::Jobsheet, 3),
            "998877_jobsheet_3.pdf"
        );
        assert_eq!(secondary_file_name("998877", 2), "998877_2_ex_1.pdf");
    }

    #[test]
    fn test_artwork_kind_serialization() {
        let json = serde_json::to_string(&ArtworkKind::Jobsheet).unwrap();
        assert_eq!(json, "\"jobsheet\"");
    }
}
