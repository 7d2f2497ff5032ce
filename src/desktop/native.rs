//! Real desktop wired to the platform windowing APIs.

use std::time::Duration;

use image::RgbaImage;
use rdev::{Button, EventType, simulate};
use tracing::debug;
use wanted_core::WindowBounds;

use super::{Desktop, DesktopError, WindowHandle};

/// [`Desktop`] backed by `xcap` for lookup/capture and `rdev` for pointer
/// events.
#[derive(Default)]
pub struct NativeDesktop {
    // xcap needs the live window object to capture, so the lookup result
    // is kept alongside the geometry handed out in the handle.
    window: Option<xcap::Window>,
}

impl NativeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(title_substring: &str) -> Result<xcap::Window, DesktopError> {
        let needle = title_substring.to_lowercase();
        let windows =
            xcap::Window::all().map_err(|error| DesktopError::Capture(error.to_string()))?;

        for window in windows {
            if window.app_name().to_lowercase().contains(&needle)
                || window.title().to_lowercase().contains(&needle)
            {
                return Ok(window);
            }
        }

        Err(DesktopError::WindowNotFound(title_substring.to_string()))
    }

    fn inject(&self, event: EventType) -> Result<(), DesktopError> {
        simulate(&event).map_err(|_| DesktopError::Input)
    }
}

impl Desktop for NativeDesktop {
    fn locate_window(&mut self, title_substring: &str) -> Result<WindowHandle, DesktopError> {
        let window = Self::find(title_substring)?;
        let handle = WindowHandle {
            bounds: WindowBounds {
                x: window.x(),
                y: window.y(),
                width: window.width(),
                height: window.height(),
            },
            title: window.title().to_string(),
            pid: window.pid(),
        };
        debug!(
            title = handle.title.as_str(),
            pid = handle.pid,
            x = handle.bounds.x,
            y = handle.bounds.y,
            width = handle.bounds.width,
            height = handle.bounds.height,
            "located window"
        );
        self.window = Some(window);
        Ok(handle)
    }

    fn capture(&mut self, handle: &WindowHandle) -> Result<RgbaImage, DesktopError> {
        let window = match &self.window {
            Some(window) => window.clone(),
            None => {
                let window = Self::find(&handle.title)?;
                self.window = Some(window.clone());
                window
            }
        };

        if window.is_minimized() {
            return Err(DesktopError::WindowMinimized(handle.title.clone()));
        }

        window
            .capture_image()
            .map_err(|error| DesktopError::Capture(error.to_string()))
    }

    fn move_cursor(&mut self, x: f64, y: f64) -> Result<(), DesktopError> {
        self.inject(EventType::MouseMove { x, y })
    }

    fn click(&mut self, x: f64, y: f64, settle: Duration) -> Result<(), DesktopError> {
        self.move_cursor(x, y)?;
        self.inject(EventType::ButtonPress(Button::Left))?;
        std::thread::sleep(settle);
        self.inject(EventType::ButtonRelease(Button::Left))
    }
}
