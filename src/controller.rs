//! The game loop controller.
//!
//! One supervised run: navigate the menus with the scripted clicks, then
//! loop identity → position → click until the process is killed. Every
//! wait is a blocking sleep through the desktop capability; nothing here
//! is concurrent.

use anyhow::{Context, Result};
use image::{RgbImage, RgbaImage, imageops};
use tracing::{debug, info, warn};
use wanted_core::geometry::{CropRegion, map_crop_point};
use wanted_core::{Character, ScaleFactors, probe};
use wanted_cv::{BBox, Detector};

use crate::config::BotConfig;
use crate::desktop::{Desktop, WindowHandle};

/// One-time transform state from the reference capture.
#[derive(Debug, Clone, Copy)]
struct Calibration {
    scale: ScaleFactors,
    capture_width: u32,
    capture_height: u32,
}

/// Drives one run of the minigame.
///
/// Generic over the desktop and the detector so the whole loop can run
/// under test with fakes on both seams.
pub struct Controller<D: Desktop, M: Detector> {
    desktop: D,
    detector: M,
    window: WindowHandle,
    config: BotConfig,
    calibration: Option<Calibration>,
}

impl<D: Desktop, M: Detector> Controller<D, M> {
    pub fn new(desktop: D, detector: M, window: WindowHandle, config: BotConfig) -> Self {
        Self {
            desktop,
            detector,
            window,
            config,
            calibration: None,
        }
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    pub fn detector(&self) -> &M {
        &self.detector
    }

    /// Compute the window-to-capture scale factors from one reference
    /// capture. Done once; the operator contract forbids moving or
    /// resizing the window afterwards, and nothing revalidates it.
    pub fn calibrate(&mut self) -> Result<()> {
        let capture = self.capture()?;
        let scale =
            ScaleFactors::from_reference(&self.window.bounds, capture.width(), capture.height());
        info!(
            scale_x = scale.x,
            scale_y = scale.y,
            capture_width = capture.width(),
            capture_height = capture.height(),
            "calibrated from reference capture"
        );
        self.calibration = Some(Calibration {
            scale,
            capture_width: capture.width(),
            capture_height: capture.height(),
        });
        Ok(())
    }

    /// Click through the menus into the minigame.
    pub fn run_menu_script(&mut self) -> Result<()> {
        let calibration = self.calibration()?;
        let script = self.config.script.clone();

        for step in &script.steps {
            let (dx, dy) = step.spot.resolve(
                calibration.capture_width,
                self.window.bounds.height,
                &calibration.scale,
            );
            let x = self.window.bounds.x as f64 + dx;
            let y = self.window.bounds.y as f64 + dy;
            info!(step = step.name.as_str(), x, y, "scripted click");
            self.desktop.click(x, y, self.config.click_settle)?;
            self.desktop.sleep(step.settle);
        }
        Ok(())
    }

    /// Poll captures until the poster names a character.
    ///
    /// `Ok(None)` only happens under a bounded policy; the stock policy
    /// polls forever.
    pub fn search_identity(&mut self) -> Result<Option<Character>> {
        let policy = self.config.identity_poll;

        for attempt in policy.attempts() {
            let capture = self.capture()?;
            if let Some(character) = probe::identify(&capture, self.config.probe_threshold)? {
                info!(character = %character, "wanted character identified");
                return Ok(Some(character));
            }
            debug!(attempt, "no character on the poster yet");
            self.desktop.sleep(policy.interval);
        }

        Ok(None)
    }

    /// With the identity fixed, poll the detector until it hands back a
    /// box confident enough to click.
    pub fn search_position(&mut self, character: Character) -> Result<Option<BBox>> {
        let policy = self.config.position_poll;

        for attempt in policy.attempts() {
            let capture = self.capture()?;
            let crop = lower_half_crop(&capture);

            let detections = match self.detector.detect(&crop) {
                Ok(detections) => detections,
                Err(error) => {
                    // Malformed detector output is recoverable: warn and
                    // keep polling.
                    warn!(%error, "detector failed on this frame");
                    self.desktop.sleep(policy.interval);
                    continue;
                }
            };

            let candidates = detections.filter_by_label(character.label());
            match candidates.best() {
                Some(bbox) if bbox.confidence >= self.config.min_click_confidence => {
                    return Ok(Some(bbox.clone()));
                }
                Some(bbox) => {
                    debug!(
                        attempt,
                        confidence = bbox.confidence,
                        "best box not confident enough to click yet"
                    );
                }
                None => {
                    debug!(attempt, character = %character, "character not in frame yet");
                }
            }
            self.desktop.sleep(policy.interval);
        }

        Ok(None)
    }

    /// Map the box centroid back to screen coordinates and click it.
    /// Returns the clicked screen position.
    pub fn click_target(&mut self, bbox: &BBox) -> Result<(f64, f64)> {
        let calibration = self.calibration()?;
        let crop = CropRegion::lower_half(calibration.capture_width, calibration.capture_height);
        let (cx, cy) = bbox.centroid();
        let (x, y) = map_crop_point(&self.window.bounds, &calibration.scale, crop.top, cx, cy);

        if let Ok(json) = bbox.to_json() {
            debug!(target = json.as_str(), "clicking detection");
        }
        info!(x, y, confidence = bbox.confidence, "clicking the wanted character");

        self.desktop.click(x, y, self.config.click_settle)?;
        self.desktop.sleep(self.config.post_click_grace);
        Ok((x, y))
    }

    /// Run the menu script once, then rounds until interrupted. Returns
    /// only if a bounded policy exhausts its budget.
    pub fn run(&mut self) -> Result<()> {
        self.run_menu_script()?;

        loop {
            let Some(character) = self.search_identity()? else {
                warn!("identity polling exhausted its retry budget");
                return Ok(());
            };
            let Some(bbox) = self.search_position(character)? else {
                warn!(character = %character, "position polling exhausted its retry budget");
                return Ok(());
            };
            self.click_target(&bbox)?;
        }
    }

    fn capture(&mut self) -> Result<RgbaImage> {
        self.desktop
            .capture(&self.window)
            .context("window capture failed")
    }

    fn calibration(&self) -> Result<Calibration> {
        self.calibration
            .context("controller used before calibration")
    }
}

/// Crop a capture down to what the detector sees: the lower DS screen
/// minus the window's bottom border, as RGB.
fn lower_half_crop(capture: &RgbaImage) -> RgbImage {
    let region = CropRegion::lower_half(capture.width(), capture.height());
    let cropped = imageops::crop_imm(
        capture,
        region.left,
        region.top,
        region.width(),
        region.height(),
    )
    .to_image();
    image::DynamicImage::ImageRgba8(cropped).to_rgb8()
}
