//! Image provider reading page images from a directory.

use crate::renderer::{RenderResult, RendererError};
use panelkit_core::raster::{ImageProvider, PageRaster};
use std::path::{Path, PathBuf};

/// Resolves page filenames against a directory and reads only the image
/// header for its dimensions.
#[derive(Debug, Clone)]
pub struct DirectoryImageProvider {
    root: PathBuf,
}

impl DirectoryImageProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pixel size of a page image.
    pub fn probe(&self, filename: &str) -> RenderResult<(u32, u32)> {
        let path = self.root.join(filename);
        image::image_dimensions(&path).map_err(|e| RendererError::ImageProbe {
            path,
            reason: e.to_string(),
        })
    }
}

impl ImageProvider for DirectoryImageProvider {
    fn raster(&self, filename: &str) -> PageRaster {
        match self.probe(filename) {
            Ok((width, height)) => PageRaster::Available { width, height },
            Err(e) => {
                log::warn!("{}", e);
                PageRaster::Missing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_dimensions() {
        let dir = tempdir().unwrap();
        image::RgbaImage::new(40, 30)
            .save(dir.path().join("001.png"))
            .unwrap();

        let provider = DirectoryImageProvider::new(dir.path());
        assert_eq!(
            provider.raster("001.png"),
            PageRaster::Available {
                width: 40,
                height: 30
            }
        );
    }

    #[test]
    fn test_missing_and_corrupt() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not an image").unwrap();
        let provider = DirectoryImageProvider::new(dir.path());

        assert_eq!(provider.raster("nope.png"), PageRaster::Missing);
        assert_eq!(provider.raster("bad.png"), PageRaster::Missing);
        assert!(matches!(
            provider.probe("nope.png"),
            Err(RendererError::ImageProbe { .. })
        ));
    }
}
