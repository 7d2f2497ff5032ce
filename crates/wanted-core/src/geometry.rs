//! Coordinate plumbing between captures, crops and the physical screen.
//!
//! The OS may hand back captures at a different pixel density than the
//! window's logical size, so every click has to pass through a pair of
//! scale factors. Those factors are computed once from a reference capture
//! and held for the whole run; the operator contract forbids moving or
//! resizing the window afterwards, and nothing here detects a violation.

use serde::{Deserialize, Serialize};

/// Bottom border of the emulator capture, in capture pixels.
pub const BOTTOM_BORDER: u32 = 48;

/// Screen-space rectangle of the emulator window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Window pixels per capture pixel, along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    /// Derive the factors from the window bounds and one reference capture.
    pub fn from_reference(window: &WindowBounds, capture_width: u32, capture_height: u32) -> Self {
        Self {
            x: window.width as f64 / capture_width as f64,
            y: window.height as f64 / capture_height as f64,
        }
    }
}

/// A rectangle in capture space, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRegion {
    /// The lower DS screen, excluding the window's bottom border. This is
    /// the slice the object detector sees.
    pub fn lower_half(capture_width: u32, capture_height: u32) -> Self {
        let bottom = capture_height.saturating_sub(BOTTOM_BORDER);
        let top = ((capture_height + BOTTOM_BORDER) / 2).min(bottom);
        Self {
            left: 0,
            top,
            right: capture_width,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Y anchor for the scripted menu clicks: the top of the lower screen, in
/// window pixels measured from the window's top edge.
pub fn lower_half_anchor(window_height: u32, scale_y: f64) -> f64 {
    (window_height as f64 + BOTTOM_BORDER as f64 * scale_y) / 2.0
}

/// Map a crop-local point to an absolute screen position.
///
/// `crop_top` is the capture row the crop started at. The mapping is linear
/// in both axes, so it is invertible whenever the scale factors are nonzero.
pub fn map_crop_point(
    window: &WindowBounds,
    scale: &ScaleFactors,
    crop_top: u32,
    x: f64,
    y: f64,
) -> (f64, f64) {
    (
        window.x as f64 + x * scale.x,
        window.y as f64 + (crop_top as f64 + y) * scale.y,
    )
}
