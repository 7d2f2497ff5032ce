//! Window and pointer capabilities of the host desktop.
//!
//! The controller only talks to the [`Desktop`] trait, which keeps the
//! control loop and the coordinate logic portable and testable against a
//! fake. The real implementation lives in [`native`].

pub mod native;

pub use native::NativeDesktop;

use std::time::Duration;

use image::RgbaImage;
use thiserror::Error;
use wanted_core::WindowBounds;

/// A located emulator window: geometry plus enough identity to capture it.
///
/// Looked up once and assumed stable for the process lifetime. If the
/// window moves or resizes after the lookup, every later coordinate is
/// silently wrong; keeping it still is the operator's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle {
    pub bounds: WindowBounds,
    pub title: String,
    pub pid: u32,
}

#[derive(Debug, Error)]
pub enum DesktopError {
    /// The one error surfaced before any interaction is attempted.
    #[error("no on-screen window matching \"{0}\" was found")]
    WindowNotFound(String),
    #[error("window \"{0}\" is minimized; a capture would show whatever is behind it")]
    WindowMinimized(String),
    #[error("screen capture failed: {0}")]
    Capture(String),
    #[error("failed to inject a synthetic pointer event")]
    Input,
}

/// Screen-capture and pointer-injection capabilities.
///
/// A capture covers the window's screen rectangle, not its surface: if
/// another window occludes it, the occluder's pixels are captured instead.
/// That is a documented limitation of rectangle capture, not something
/// this layer detects.
pub trait Desktop {
    /// Find the first on-screen window whose owner name or title contains
    /// `title_substring`, case-insensitively. No disambiguation when
    /// several match.
    fn locate_window(&mut self, title_substring: &str) -> Result<WindowHandle, DesktopError>;

    /// Grab the window's current pixels.
    fn capture(&mut self, window: &WindowHandle) -> Result<RgbaImage, DesktopError>;

    /// Move the pointer to an absolute screen position. Fire-and-forget;
    /// there is no confirmation the OS processed it.
    fn move_cursor(&mut self, x: f64, y: f64) -> Result<(), DesktopError>;

    /// Press and release the primary button at `(x, y)`, holding it down
    /// for `settle`. Some targets drop a click whose down and up are not
    /// separated in time, so the delay is mandatory.
    fn click(&mut self, x: f64, y: f64, settle: Duration) -> Result<(), DesktopError>;

    /// Block for `duration`. Fakes override this so tests run instantly.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
