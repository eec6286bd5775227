//! PanelKit Render Library
//!
//! The renderer seam for the panel editor: what to draw for a session's
//! current page, and page raster sizes read from image files.

mod draw_list;
mod provider;
mod renderer;

pub use draw_list::{DrawCommand, Overlay, build_draw_list};
pub use provider::DirectoryImageProvider;
pub use renderer::{DrawListRenderer, RenderContext, RenderResult, Renderer, RendererError};
