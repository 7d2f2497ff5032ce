//! Detector configuration.

use serde::{Deserialize, Serialize};
use wanted_core::Character;

/// Configuration for the ONNX detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Square side length the model expects its input resized to.
    pub input_size: u32,
    /// Decode-time floor; rows below this are noise, not candidates. The
    /// click-worthiness gate lives in the game loop, not here.
    pub confidence_threshold: f64,
    /// IoU threshold for non-maximum suppression.
    pub nms_threshold: f64,
    /// Class names in model output order.
    pub class_names: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            input_size: 640,
            confidence_threshold: 0.25,
            nms_threshold: 0.45,
            class_names: Character::ALL
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
        }
    }
}
