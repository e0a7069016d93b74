use serde::{Deserialize, Serialize};

use crate::command::{Intensity, ToolKind};
use crate::geometry::MIN_SELECTION_SIZE;

/// Tunables for the editor. Every field has a default, so a partial JSON
/// document is enough to override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Committed gestures must be larger than this in both dimensions (source pixels)
    pub min_selection_size: f32,
    /// Tool selected when the editor starts
    pub default_tool: ToolKind,
    /// Intensity selected when the editor starts
    pub default_intensity: Intensity,
    /// Files larger than this are rejected before decoding
    pub max_source_bytes: usize,
    /// JPEG quality used for exports (1-100)
    pub jpeg_quality: u8,
    /// File name written by "Download Result"
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_selection_size: MIN_SELECTION_SIZE,
            default_tool: ToolKind::Mosaic,
            default_intensity: Intensity::default(),
            max_source_bytes: 10 * 1024 * 1024,
            jpeg_quality: 90,
            export_file_name: "privacy-pixel-edited.jpg".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
