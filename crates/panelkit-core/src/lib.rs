//! PanelKit Core Library
//!
//! Panel geometry, selection, edit modes and undo history for the comic
//! panel editor. Front ends feed [`EditorEvent`]s and [`Command`]s into an
//! [`EditorSession`] and redraw from its state.

pub mod command;
pub mod config;
pub mod document;
pub mod effects;
pub mod geometry;
pub mod history;
pub mod input;
pub mod keymap;
pub mod mapper;
pub mod mode;
pub mod raster;
pub mod selection;
pub mod session;
pub mod storage;

pub use command::Command;
pub use config::{ConfigError, EditorConfig};
pub use document::{Document, DocumentError, Numbering, Page, PageSize, reading_order};
pub use effects::{EffectKind, EffectSettings};
pub use geometry::{HandleKind, PanelRect, handle_at, handle_rects, resize_with_handle, union};
pub use history::{History, Snapshot};
pub use input::{EditorEvent, Key, Modifiers};
pub use keymap::{Keymap, Shortcut};
pub use mapper::CanvasMapper;
pub use mode::{EditMode, Gesture};
pub use raster::{ImageProvider, MemoryImageProvider, PageRaster};
pub use selection::SelectionState;
pub use session::EditorSession;
