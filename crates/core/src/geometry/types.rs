use serde::{Deserialize, Serialize};

use crate::normalizer::round2;

/// Millimeters per PDF point (1 pt = 1/72 inch).
pub const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Page boundary boxes a PDF page may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageBoxKind {
    MediaBox,
    CropBox,
    BleedBox,
    TrimBox,
    ArtBox,
}

impl PageBoxKind {
    pub const ALL: [PageBoxKind; 5] = [
        PageBoxKind::MediaBox,
        PageBoxKind::CropBox,
        PageBoxKind::BleedBox,
        PageBoxKind::TrimBox,
        PageBoxKind::ArtBox,
    ];

    /// Dictionary key in the page object.
    pub fn key(self) -> &'static [u8] {
        match self {
            Self::MediaBox => b"MediaBox",
            Self::CropBox => b"CropBox",
            Self::BleedBox => b"BleedBox",
            Self::TrimBox => b"TrimBox",
            Self::ArtBox => b"ArtBox",
        }
    }

    /// Only these may be inherited from an ancestor page tree node.
    pub fn is_inheritable(self) -> bool {
        matches!(self, Self::MediaBox | Self::CropBox)
    }
}

/// A page box in PDF points, as `[x_ll, y_ll, x_ur, y_ur]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfBox {
    pub x_ll: f64,
    pub y_ll: f64,
    pub x_ur: f64,
    pub y_ur: f64,
}

impl PdfBox {
    pub fn new(x_ll: f64, y_ll: f64, x_ur: f64, y_ur: f64) -> Self {
        Self {
            x_ll,
            y_ll,
            x_ur,
            y_ur,
        }
    }

    pub fn coords(&self) -> [f64; 4] {
        [self.x_ll, self.y_ll, self.x_ur, self.y_ur]
    }

    /// Converts to millimeters.
    pub fn details(&self) -> BoxDetails {
        box_details(self)
    }
}

/// A box converted to millimeters, every value rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDetails {
    pub lower_left: (f64, f64),
    pub upper_right: (f64, f64),
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Converts a box from points to millimeters.
pub fn box_details(pdf_box: &PdfBox) -> BoxDetails {
    let [x_ll, y_ll, x_ur, y_ur] = pdf_box.coords().map(|c| c * MM_PER_POINT);

    BoxDetails {
        lower_left: (round2(x_ll), round2(y_ll)),
        upper_right: (round2(x_ur), round2(y_ur)),
        width_mm: round2(x_ur - x_ll),
        height_mm: round2(y_ur - y_ll),
    }
}

/// Every page box found on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageBoxes {
    pub media_box: Option<PdfBox>,
    pub crop_box: Option<PdfBox>,
    pub bleed_box: Option<PdfBox>,
    pub trim_box: Option<PdfBox>,
    pub art_box: Option<PdfBox>,
}

impl PageBoxes {
    pub fn get(&self, kind: PageBoxKind) -> Option<PdfBox> {
        match kind {
            PageBoxKind::MediaBox => self.media_box,
            PageBoxKind::CropBox => self.crop_box,
            PageBoxKind::BleedBox => self.bleed_box,
            PageBoxKind::TrimBox => self.trim_box,
            PageBoxKind::ArtBox => self.art_box,
        }
    }

    pub fn set(&mut self, kind: PageBoxKind, value: Option<PdfBox>) {
        match kind {
            PageBoxKind::MediaBox => self.media_box = value,
            PageBoxKind::CropBox => self.crop_box = value,
            PageBoxKind::BleedBox => self.bleed_box = value,
            PageBoxKind::TrimBox => self.trim_box = value,
            PageBoxKind::ArtBox => self.art_box = value,
        }
    }
}
