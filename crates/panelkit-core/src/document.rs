//! Comic document model: pages and their ordered panel lists.

use crate::geometry::PanelRect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Document loading and export errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid page {index}: {reason}")]
    InvalidPage { index: usize, reason: String },
    #[error("Invalid panel {panel} on page {page}: {reason}")]
    InvalidPanel {
        page: usize,
        panel: usize,
        reason: String,
    },
    #[error("IO error: {0}")]
    Io(String),
}

/// Reading direction of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// Left to right (western comics).
    #[default]
    Ltr,
    /// Right to left (manga).
    Rtl,
}

/// Pixel size of a page image. Serialized as `[width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct PageSize {
    pub width: i32,
    pub height: i32,
}

impl PageSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size as a kurbo size.
    pub fn to_kurbo(self) -> kurbo::Size {
        kurbo::Size::new(f64::from(self.width), f64::from(self.height))
    }
}

impl From<[i32; 2]> for PageSize {
    fn from([width, height]: [i32; 2]) -> Self {
        Self::new(width, height)
    }
}

impl From<PageSize> for [i32; 2] {
    fn from(size: PageSize) -> Self {
        [size.width, size.height]
    }
}

/// One page image and its panels in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Image file name, resolved by the image provider.
    pub filename: String,
    /// Image size in document pixels.
    pub size: PageSize,
    /// Reading direction, if the source declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<Numbering>,
    /// Panels; the index is the panel's identity.
    #[serde(default)]
    pub panels: Vec<PanelRect>,
    /// Fields this editor does not interpret, kept for export.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Page {
    /// Create a page without panels.
    pub fn new(filename: impl Into<String>, size: PageSize) -> Self {
        Self {
            filename: filename.into(),
            size,
            numbering: None,
            panels: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Builder-style panel list.
    pub fn with_panels(mut self, panels: Vec<PanelRect>) -> Self {
        self.panels = panels;
        self
    }

    /// Percentage of the page area covered by panels, rounded to 2 decimals.
    ///
    /// Overlapping panels are counted twice. `None` for a zero-area page.
    pub fn panel_coverage(&self) -> Option<f64> {
        let page_area = i64::from(self.size.width) * i64::from(self.size.height);
        if page_area <= 0 {
            return None;
        }
        let covered: i64 = self.panels.iter().map(PanelRect::area).sum();
        let percentage = covered as f64 / page_area as f64 * 100.0;
        Some((percentage * 100.0).round() / 100.0)
    }

    /// Panels reordered into reading order for the given direction.
    pub fn panels_in_reading_order(&self, direction: Numbering) -> Vec<PanelRect> {
        reading_order(&self.panels, direction)
            .into_iter()
            .map(|i| self.panels[i])
            .collect()
    }
}

/// Permutation putting `panels` into reading order.
///
/// Panels are grouped into rows: a panel joins the current row when its top
/// lies above the vertical midpoint of the row's first panel. Rows run top to
/// bottom; panels within a row follow `direction`.
pub fn reading_order(panels: &[PanelRect], direction: Numbering) -> Vec<usize> {
    let mut by_top: Vec<usize> = (0..panels.len()).collect();
    by_top.sort_by_key(|&i| (panels[i].y, panels[i].x));

    let midline = |row: &[usize]| {
        let first = &panels[row[0]];
        first.y + first.height / 2
    };

    let mut rows: Vec<Vec<usize>> = Vec::new();
    for i in by_top {
        match rows.last_mut() {
            Some(row) if panels[i].y < midline(row.as_slice()) => row.push(i),
            _ => rows.push(vec![i]),
        }
    }

    for row in &mut rows {
        match direction {
            Numbering::Ltr => row.sort_by_key(|&i| (panels[i].x, panels[i].y)),
            Numbering::Rtl => {
                row.sort_by_key(|&i| (std::cmp::Reverse(panels[i].right()), panels[i].y))
            }
        }
    }

    rows.into_iter().flatten().collect()
}

/// The edited document: an ordered list of pages.
///
/// Serialized as a bare JSON array of pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Get a page by index.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Get a mutable page by index.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of panels across all pages.
    pub fn panel_count(&self) -> usize {
        self.pages.iter().map(|p| p.panels.len()).sum()
    }

    /// Check the data model invariants of a freshly decoded document.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (index, page) in self.pages.iter().enumerate() {
            if page.size.width <= 0 || page.size.height <= 0 {
                return Err(DocumentError::InvalidPage {
                    index,
                    reason: format!(
                        "size must be positive, got {}x{}",
                        page.size.width, page.size.height
                    ),
                });
            }
            for (panel, rect) in page.panels.iter().enumerate() {
                if !rect.is_valid() {
                    return Err(DocumentError::InvalidPanel {
                        page: index,
                        panel,
                        reason: format!(
                            "width and height must be positive, got {}x{}",
                            rect.width, rect.height
                        ),
                    });
                }
                if rect.x < 0 || rect.y < 0 {
                    return Err(DocumentError::InvalidPanel {
                        page: index,
                        panel,
                        reason: format!("origin must not be negative, got ({}, {})", rect.x, rect.y),
                    });
                }
            }
        }
        Ok(())
    }

    /// Decode and validate a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        log::info!(
            "Loaded document with {} pages and {} panels",
            document.len(),
            document.panel_count()
        );
        Ok(document)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| DocumentError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Write the document to a file.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| DocumentError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("Exported document to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "filename": "page_001.jpg",
            "size": [800, 1200],
            "numbering": "rtl",
            "panels": [[10, 10, 380, 500], [410, 10, 380, 500]],
            "panel_percentage": 39.58
        },
        {
            "filename": "page_002.jpg",
            "size": [800, 1200],
            "panels": []
        }
    ]"#;

    #[test]
    fn test_parse_sample() {
        let doc = Document::from_json(SAMPLE).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.panel_count(), 2);

        let page = doc.page(0).unwrap();
        assert_eq!(page.size, PageSize::new(800, 1200));
        assert_eq!(page.numbering, Some(Numbering::Rtl));
        assert_eq!(page.panels[1], PanelRect::new(410, 10, 380, 500));
        assert!(page.extra.contains_key("panel_percentage"));
        assert_eq!(doc.page(1).unwrap().numbering, None);
    }

    #[test]
    fn test_export_keeps_tuple_format() {
        let doc = Document::from_json(SAMPLE).unwrap();
        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["panels"][0], serde_json::json!([10, 10, 380, 500]));
        assert_eq!(value[0]["size"], serde_json::json!([800, 1200]));
        assert_eq!(value[0]["numbering"], "rtl");
        assert_eq!(value[0]["panel_percentage"], 39.58);
        assert!(value[1].get("numbering").is_none());

        let reparsed = Document::from_json(&json).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            Document::from_json("{\"pages\": 1}"),
            Err(DocumentError::Parse(_))
        ));
        // Panels are integer 4-tuples, not objects.
        let bad = r#"[{"filename": "a.jpg", "size": [10, 10], "panels": [{"x": 1}]}]"#;
        assert!(matches!(Document::from_json(bad), Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let zero_page = r#"[{"filename": "a.jpg", "size": [0, 10], "panels": []}]"#;
        assert!(matches!(
            Document::from_json(zero_page),
            Err(DocumentError::InvalidPage { index: 0, .. })
        ));

        let flat_panel = r#"[{"filename": "a.jpg", "size": [10, 10], "panels": [[1, 1, 5, 0]]}]"#;
        assert!(matches!(
            Document::from_json(flat_panel),
            Err(DocumentError::InvalidPanel { page: 0, panel: 0, .. })
        ));
    }

    #[test]
    fn test_panel_coverage() {
        let page = Page::new("a.jpg", PageSize::new(100, 200))
            .with_panels(vec![PanelRect::new(0, 0, 50, 100), PanelRect::new(0, 100, 30, 10)]);
        assert_eq!(page.panel_coverage(), Some(26.5));

        let page = Page::new("a.jpg", PageSize::new(3, 3)).with_panels(vec![PanelRect::new(0, 0, 1, 1)]);
        assert_eq!(page.panel_coverage(), Some(11.11));

        let page = Page::new("a.jpg", PageSize::new(0, 200));
        assert_eq!(page.panel_coverage(), None);
    }

    #[test]
    fn test_reading_order_ltr() {
        // Two rows of two panels, listed out of order.
        let panels = vec![
            PanelRect::new(400, 520, 380, 500),
            PanelRect::new(10, 10, 380, 500),
            PanelRect::new(10, 530, 380, 490),
            PanelRect::new(410, 20, 380, 480),
        ];
        assert_eq!(reading_order(&panels, Numbering::Ltr), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_reading_order_rtl() {
        let panels = vec![
            PanelRect::new(10, 10, 380, 500),
            PanelRect::new(410, 20, 380, 480),
            PanelRect::new(10, 530, 780, 490),
        ];
        assert_eq!(reading_order(&panels, Numbering::Rtl), vec![1, 0, 2]);

        let page = Page::new("a.jpg", PageSize::new(800, 1200)).with_panels(panels.clone());
        assert_eq!(
            page.panels_in_reading_order(Numbering::Rtl),
            vec![panels[1], panels[0], panels[2]]
        );
    }
}
