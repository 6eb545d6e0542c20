use serde::{Deserialize, Serialize};

use crate::core::ZoomWindow;
use crate::interaction::DragMode;
use crate::render::{DrawStats, RenderPath};

/// Serializable state of one view, used by regression fixtures and
/// debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub window: ZoomWindow,
    pub init_window: ZoomWindow,
    pub zoom_factor: f64,
    pub radius: u32,
    pub alpha: f64,
    pub drag_mode: DragMode,
    /// Ascending point indices.
    pub selection: Vec<u32>,
    pub visible_count: usize,
    pub hidden_count: usize,
    pub emphasis: Option<u8>,
    pub show_labels: bool,
    pub status: String,
    pub last_render_path: Option<RenderPath>,
    pub last_stats: DrawStats,
}
