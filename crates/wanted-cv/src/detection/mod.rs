//! Model-backed object detection.

pub mod config;
pub mod yolo;

pub use config::DetectionConfig;
pub use yolo::YoloDetector;

use image::RgbImage;

use crate::Result;
use crate::bbox::BBoxCollection;

/// Anything that can turn an image into labeled boxes.
///
/// The game loop only depends on this seam, so tests drive it with canned
/// detections instead of a model on disk.
pub trait Detector {
    fn detect(&self, image: &RgbImage) -> Result<BBoxCollection>;
}
