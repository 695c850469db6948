//! PDF page geometry.
//!
//! Reads the boundary boxes of an artwork's first page and converts them
//! from points to millimeters. The trim box is the final cut size of the
//! label and is what intake compares against the ordered dimensions.

mod error;
mod extractor;
mod types;

pub use error::GeometryError;
pub use extractor::{extract_all_boxes, extract_trim_box, GeometryExtractor, LopdfGeometryExtractor};
pub use types::{box_details, BoxDetails, PageBoxKind, PageBoxes, PdfBox, MM_PER_POINT};
