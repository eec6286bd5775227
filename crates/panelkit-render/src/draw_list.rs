//! Decides what a frame shows: page image, effect overlays, panel outlines,
//! resize handles and the pointer readout, in painting order.

use crate::renderer::RenderContext;
use kurbo::Rect;
use panelkit_core::effects::EffectKind;
use panelkit_core::geometry::{HandleKind, handle_rects};
use panelkit_core::mode::EditMode;
use panelkit_core::raster::PageRaster;
use peniko::Color;
use std::fmt;

/// Effect drawn inside one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Panel content downsampled to a `columns` x `rows` grid.
    Pixelate { columns: u32, rows: u32 },
    Blur { radius: u32 },
}

/// A single drawing instruction. Geometry is in document pixels.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    PageImage {
        filename: String,
        bounds: Rect,
    },
    /// Stand-in for a page whose image is missing.
    Placeholder {
        filename: String,
        bounds: Rect,
    },
    EffectOverlay {
        panel: usize,
        rect: Rect,
        overlay: Overlay,
    },
    PanelOutline {
        panel: usize,
        rect: Rect,
        color: Color,
        width: f64,
        label: Option<String>,
    },
    Handle {
        kind: HandleKind,
        rect: Rect,
        fill: Color,
        stroke: Color,
    },
    PointerReadout {
        x: i32,
        y: i32,
    },
}

/// Build the draw commands for the session's current page.
///
/// Returns an empty list when the document has no pages.
pub fn build_draw_list(ctx: &RenderContext) -> Vec<DrawCommand> {
    let session = ctx.session;
    let Some(page) = session.current_page() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(page.panels.len() * 2 + 10);

    let bounds = Rect::from_origin_size(kurbo::Point::ORIGIN, page.size.to_kurbo());
    let filename = page.filename.clone();
    commands.push(match ctx.images.raster(&page.filename) {
        PageRaster::Available { .. } => DrawCommand::PageImage { filename, bounds },
        PageRaster::Missing => {
            log::warn!("Image for page {} is missing, drawing placeholder", page.filename);
            DrawCommand::Placeholder { filename, bounds }
        }
    });

    let effects = session.effects();
    if effects.enabled {
        for (panel, rect) in page.panels.iter().enumerate() {
            let overlay = match effects.kind {
                EffectKind::Pixelate => {
                    let (columns, rows) = effects.pixelate_grid(rect);
                    Overlay::Pixelate { columns, rows }
                }
                EffectKind::Blur => Overlay::Blur {
                    radius: effects.effective_size(),
                },
            };
            commands.push(DrawCommand::EffectOverlay {
                panel,
                rect: rect.to_kurbo(),
                overlay,
            });
        }
    }

    let selection = session.selection();
    for (panel, rect) in page.panels.iter().enumerate() {
        let (color, width) = if selection.active() == Some(panel) {
            (ctx.active_color, ctx.active_width)
        } else if selection.is_merge_candidate(panel) {
            (ctx.merge_color, ctx.merge_width)
        } else {
            (ctx.idle_color, ctx.idle_width)
        };
        commands.push(DrawCommand::PanelOutline {
            panel,
            rect: rect.to_kurbo(),
            color,
            width,
            label: ctx.show_labels.then(|| (panel + 1).to_string()),
        });
    }

    if session.mode() != EditMode::Merge {
        let active = selection.active().and_then(|i| page.panels.get(i));
        if let Some(rect) = active {
            for (kind, handle) in handle_rects(rect, session.config().handle_size) {
                commands.push(DrawCommand::Handle {
                    kind,
                    rect: handle.to_kurbo(),
                    fill: ctx.handle_fill,
                    stroke: ctx.handle_stroke,
                });
            }
        }
    }

    if ctx.show_pointer {
        if let Some((x, y)) = session.pointer_position() {
            commands.push(DrawCommand::PointerReadout { x, y });
        }
    }

    commands
}

fn hex(color: &Color) -> String {
    let [r, g, b, _] = color.components;
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02X}{:02X}{:02X}", byte(r), byte(g), byte(b))
}

fn rect_tuple(rect: &Rect) -> String {
    format!(
        "[{}, {}, {}, {}]",
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height()
    )
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::PageImage { filename, bounds } => {
                write!(f, "image {} {}", filename, rect_tuple(bounds))
            }
            DrawCommand::Placeholder { filename, bounds } => {
                write!(f, "placeholder {} {}", filename, rect_tuple(bounds))
            }
            DrawCommand::EffectOverlay {
                panel,
                rect,
                overlay,
            } => match overlay {
                Overlay::Pixelate { columns, rows } => write!(
                    f,
                    "pixelate panel {} {} grid {}x{}",
                    panel + 1,
                    rect_tuple(rect),
                    columns,
                    rows
                ),
                Overlay::Blur { radius } => write!(
                    f,
                    "blur panel {} {} radius {}",
                    panel + 1,
                    rect_tuple(rect),
                    radius
                ),
            },
            DrawCommand::PanelOutline {
                panel,
                rect,
                color,
                width,
                label,
            } => {
                write!(
                    f,
                    "outline panel {} {} {} width {}",
                    panel + 1,
                    rect_tuple(rect),
                    hex(color),
                    width
                )?;
                if let Some(label) = label {
                    write!(f, " label \"{}\"", label)?;
                }
                Ok(())
            }
            DrawCommand::Handle { kind, rect, .. } => {
                write!(f, "handle {:?} {}", kind, rect_tuple(rect))
            }
            DrawCommand::PointerReadout { x, y } => write!(f, "pointer x={} y={}", x, y),
        }
    }
}
