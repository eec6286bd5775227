//! Effect overlays drawn over panel regions (pixelate or blur).

use crate::geometry::PanelRect;
use serde::{Deserialize, Serialize};

/// Default effect strength.
pub const DEFAULT_EFFECT_SIZE: u32 = 64;

/// Kind of effect applied inside each panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Downsample the panel to blocks of `size` pixels.
    #[default]
    Pixelate,
    /// Gaussian blur with a radius of `size` pixels.
    Blur,
}

impl EffectKind {
    /// Display name for this effect.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Pixelate => "Pixelate",
            EffectKind::Blur => "Blur",
        }
    }
}

/// Effect overlay settings of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub enabled: bool,
    pub kind: EffectKind,
    pub size: u32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: EffectKind::default(),
            size: DEFAULT_EFFECT_SIZE,
        }
    }
}

impl EffectSettings {
    /// Block size, never zero.
    pub fn effective_size(&self) -> u32 {
        self.size.max(1)
    }

    /// Downsampled grid (columns, rows) for pixelating `rect`.
    ///
    /// A panel smaller than one block yields a 1x1 grid.
    pub fn pixelate_grid(&self, rect: &PanelRect) -> (u32, u32) {
        let size = self.effective_size();
        let cols = rect.width.max(0) as u32 / size;
        let rows = rect.height.max(0) as u32 / size;
        (cols.max(1), rows.max(1))
    }
}
