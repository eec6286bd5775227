//! Renderer trait abstraction.

use crate::draw_list::{DrawCommand, build_draw_list};
use panelkit_core::EditorSession;
use panelkit_core::raster::ImageProvider;
use peniko::Color;
use std::path::PathBuf;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Cannot read image header of {path}: {reason}")]
    ImageProbe { path: PathBuf, reason: String },
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The session to render.
    pub session: &'a EditorSession,
    /// Source of page raster sizes.
    pub images: &'a dyn ImageProvider,
    /// Outline of the active panel.
    pub active_color: Color,
    pub active_width: f64,
    /// Outline of merge candidates.
    pub merge_color: Color,
    pub merge_width: f64,
    /// Outline of every other panel.
    pub idle_color: Color,
    pub idle_width: f64,
    pub handle_fill: Color,
    pub handle_stroke: Color,
    /// Draw the 1-based panel number next to each outline.
    pub show_labels: bool,
    /// Draw the pointer coordinate readout.
    pub show_pointer: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(session: &'a EditorSession, images: &'a dyn ImageProvider) -> Self {
        Self {
            session,
            images,
            active_color: Color::from_rgba8(255, 0, 0, 255),  // Red
            active_width: 4.0,
            merge_color: Color::from_rgba8(255, 140, 0, 255), // Dark orange
            merge_width: 4.0,
            idle_color: Color::from_rgba8(0, 255, 0, 255),    // Lime
            idle_width: 2.0,
            handle_fill: Color::from_rgba8(255, 255, 255, 255),
            handle_stroke: Color::from_rgba8(0, 0, 0, 255),
            show_labels: true,
            show_pointer: true,
        }
    }

    /// Set the active panel outline.
    pub fn with_active_outline(mut self, color: Color, width: f64) -> Self {
        self.active_color = color;
        self.active_width = width;
        self
    }

    /// Set the merge candidate outline.
    pub fn with_merge_outline(mut self, color: Color, width: f64) -> Self {
        self.merge_color = color;
        self.merge_width = width;
        self
    }

    /// Set the outline of unselected panels.
    pub fn with_idle_outline(mut self, color: Color, width: f64) -> Self {
        self.idle_color = color;
        self.idle_width = width;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn with_pointer_readout(mut self, show: bool) -> Self {
        self.show_pointer = show;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;
}

/// Renderer that keeps the planned draw commands instead of rasterizing them.
#[derive(Debug, Default)]
pub struct DrawListRenderer {
    commands: Vec<DrawCommand>,
}

impl DrawListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last built frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for DrawListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        if ctx.session.current_page().is_none() {
            return Err(RendererError::RenderFailed("document has no pages".to_string()));
        }
        self.commands = build_draw_list(ctx);
        log::debug!("Built frame with {} draw command(s)", self.commands.len());
        Ok(())
    }
}
