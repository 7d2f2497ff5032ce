//! Detection layer for the minigame bot.
//!
//! The detection intelligence lives in an externally trained model loaded
//! from disk; this crate only wraps it behind the [`Detector`] seam and
//! provides the bounding-box plumbing around it. Nothing in here trains or
//! otherwise constrains that model.

pub mod bbox;
pub mod detection;

pub use bbox::{BBox, BBoxCollection};
pub use detection::{DetectionConfig, Detector, YoloDetector};

/// Crate-wide result type.
pub type Result<T> = anyhow::Result<T>;
