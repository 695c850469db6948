//! Page box extraction using lopdf.

use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::error::GeometryError;
use super::types::{PageBoxKind, PageBoxes, PdfBox};

/// Parent chain depth limit, guards against cyclic page trees.
const MAX_PARENT_DEPTH: usize = 32;

/// Reads page geometry from artwork files.
pub trait GeometryExtractor: Send + Sync {
    /// Trim box of the first page. `Ok(None)` when the page declares none.
    fn trim_box(&self, path: &Path) -> Result<Option<PdfBox>, GeometryError>;

    /// Every page box of the first page.
    fn all_boxes(&self, path: &Path) -> Result<PageBoxes, GeometryError>;
}

impl<T: GeometryExtractor + ?Sized> GeometryExtractor for Arc<T> {
    fn trim_box(&self, path: &Path) -> Result<Option<PdfBox>, GeometryError> {
        (**self).trim_box(path)
    }

    fn all_boxes(&self, path: &Path) -> Result<PageBoxes, GeometryError> {
        (**self).all_boxes(path)
    }
}

/// [`GeometryExtractor`] backed by lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfGeometryExtractor;

impl LopdfGeometryExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryExtractor for LopdfGeometryExtractor {
    fn trim_box(&self, path: &Path) -> Result<Option<PdfBox>, GeometryError> {
        extract_trim_box(path)
    }

    fn all_boxes(&self, path: &Path) -> Result<PageBoxes, GeometryError> {
        extract_all_boxes(path)
    }
}

/// Trim box of the first page of the PDF at `path`.
pub fn extract_trim_box(path: &Path) -> Result<Option<PdfBox>, GeometryError> {
    let doc = open_pdf(path)?;
    let page = first_page(&doc, path)?;
    page_box(&doc, page, PageBoxKind::TrimBox)
}

/// Every page box of the first page of the PDF at `path`.
pub fn extract_all_boxes(path: &Path) -> Result<PageBoxes, GeometryError> {
    let doc = open_pdf(path)?;
    let page = first_page(&doc, path)?;

    let mut boxes = PageBoxes::default();
    for kind in PageBoxKind::ALL {
        boxes.set(kind, page_box(&doc, page, kind)?);
    }
    Ok(boxes)
}

fn open_pdf(path: &Path) -> Result<Document, GeometryError> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !path.is_file() || !is_pdf {
        return Err(GeometryError::NotAPdf {
            path: path.to_path_buf(),
        });
    }

    Document::load(path).map_err(|e| GeometryError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn first_page<'a>(doc: &'a Document, path: &Path) -> Result<&'a Dictionary, GeometryError> {
    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| GeometryError::NoPages {
            path: path.to_path_buf(),
        })?;

    doc.get_dictionary(page_id)
        .map_err(|e| GeometryError::Malformed(format!("page object: {}", e)))
}

fn page_box(
    doc: &Document,
    page: &Dictionary,
    kind: PageBoxKind,
) -> Result<Option<PdfBox>, GeometryError> {
    if let Ok(obj) = page.get(kind.key()) {
        return parse_rect(doc, obj, kind).map(Some);
    }
    if !kind.is_inheritable() {
        return Ok(None);
    }

    let mut node = page;
    for _ in 0..MAX_PARENT_DEPTH {
        let parent_id = match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        node = match doc.get_dictionary(parent_id) {
            Ok(dict) => dict,
            Err(_) => return Ok(None),
        };
        if let Ok(obj) = node.get(kind.key()) {
            debug!(?kind, "Using inherited page box");
            return parse_rect(doc, obj, kind).map(Some);
        }
    }
    Ok(None)
}

/// Parses a rectangle array, resolving indirect references.
fn parse_rect(doc: &Document, obj: &Object, kind: PageBoxKind) -> Result<PdfBox, GeometryError> {
    let arr = match obj {
        Object::Array(a) => a,
        Object::Reference(id) => doc
            .get_object(*id)
            .and_then(Object::as_array)
            .map_err(|_| GeometryError::Malformed(format!("{:?} reference is not an array", kind)))?,
        _ => {
            return Err(GeometryError::Malformed(format!(
                "{:?} is not an array",
                kind
            )))
        }
    };

    if arr.len() != 4 {
        return Err(GeometryError::Malformed(format!(
            "{:?} has {} elements, expected 4",
            kind,
            arr.len()
        )));
    }

    let mut values = [0.0f64; 4];
    for (i, obj) in arr.iter().enumerate() {
        values[i] = extract_number(doc, obj)?;
    }

    // Corners may be given in any order
    Ok(PdfBox::new(
        values[0].min(values[2]),
        values[1].min(values[3]),
        values[0].max(values[2]),
        values[1].max(values[3]),
    ))
}

fn extract_number(doc: &Document, obj: &Object) -> Result<f64, GeometryError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(*r as f64),
        Object::Reference(id) => {
            let resolved = doc
                .get_object(*id)
                .map_err(|e| GeometryError::Malformed(format!("unresolvable number: {}", e)))?;
            extract_number(doc, resolved)
        }
        _ => Err(GeometryError::Malformed(
            "expected number in rectangle".to_string(),
        )),
    }
}
