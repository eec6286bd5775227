//! Page raster lookup.

use std::collections::HashMap;

/// What the image provider knows about a page's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRaster {
    /// Image found, with its pixel size.
    Available { width: u32, height: u32 },
    /// Image missing or unreadable. Panels stay editable.
    Missing,
}

impl PageRaster {
    pub fn is_available(&self) -> bool {
        matches!(self, PageRaster::Available { .. })
    }
}

/// Supplies raster dimensions for page images by filename.
pub trait ImageProvider {
    fn raster(&self, filename: &str) -> PageRaster;
}

/// Provider backed by a fixed table, for tests and headless sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageProvider {
    sizes: HashMap<String, (u32, u32)>,
}

impl MemoryImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filename: impl Into<String>, width: u32, height: u32) {
        self.sizes.insert(filename.into(), (width, height));
    }

    pub fn with(mut self, filename: impl Into<String>, width: u32, height: u32) -> Self {
        self.insert(filename, width, height);
        self
    }
}

impl ImageProvider for MemoryImageProvider {
    fn raster(&self, filename: &str) -> PageRaster {
        match self.sizes.get(filename) {
            Some(&(width, height)) => PageRaster::Available { width, height },
            None => PageRaster::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider() {
        let provider = MemoryImageProvider::new().with("001.jpg", 800, 1200);
        assert_eq!(
            provider.raster("001.jpg"),
            PageRaster::Available {
                width: 800,
                height: 1200
            }
        );
        assert_eq!(provider.raster("002.jpg"), PageRaster::Missing);
        assert!(!provider.raster("002.jpg").is_available());
    }
}
