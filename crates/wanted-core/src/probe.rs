//! Single-pixel identity probe for the wanted poster.
//!
//! The poster occupies a known position in the game layout, so one sampled
//! pixel is enough to tell the characters apart by color. The sample
//! position is derived proportionally from the capture width, which keeps
//! the probe valid across window sizes. One sample, no retries, no
//! filtering: correctness rests entirely on that layout assumption.

use anyhow::{Result, ensure};
use image::RgbaImage;

use crate::character::{Character, color_distance};

/// Top border of the emulator capture, in capture pixels.
const TOP_BORDER: f64 = 104.0;

/// Vertical position of the probe inside the upper screen, as a fraction.
/// Lands on the hat brim / eyebrows for every character.
const POSTER_DEPTH: f64 = 0.405;

/// Default bound on how far (in RGB distance) the sampled pixel may be from
/// a reference color before the probe declines to guess.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 100.0;

/// Where to sample, derived from the capture width alone.
pub fn probe_point(width: u32) -> (u32, u32) {
    let upper_screen_height = (1.5 * width as f64) / 2.0;
    let x = width / 2;
    let y = (upper_screen_height * POSTER_DEPTH + TOP_BORDER) as u32;
    (x, y)
}

/// Classify the wanted character from a full window capture.
///
/// Returns `Ok(None)` while the poster has not appeared yet, i.e. the
/// sampled pixel is not close enough to any reference color. Errors only
/// when the capture is too small to contain the probe point at all.
pub fn identify(image: &RgbaImage, threshold: f64) -> Result<Option<Character>> {
    let (x, y) = probe_point(image.width());
    ensure!(
        x < image.width() && y < image.height(),
        "probe point ({}, {}) lies outside the {}x{} capture",
        x,
        y,
        image.width(),
        image.height()
    );
    let pixel = image.get_pixel(x, y);
    Ok(classify((pixel[0], pixel[1], pixel[2]), threshold))
}

/// Nearest-reference classification of one RGB sample.
///
/// The threshold is an exclusive upper bound: a sample exactly at threshold
/// distance is "no identification yet".
pub fn classify(sample: (u8, u8, u8), threshold: f64) -> Option<Character> {
    let (character, distance) = Character::ALL
        .into_iter()
        .map(|c| (c, color_distance(sample, c.reference_color())))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    if distance < threshold {
        Some(character)
    } else {
        None
    }
}
