//! Domain logic for the "Wanted!" minigame bot.
//!
//! Everything in here is pure: character identities and the color probe,
//! the coordinate math between captures and the physical screen, the
//! declarative menu script, and the retry policies driving the polling
//! loops. Nothing touches the OS.

pub mod character;
pub mod geometry;
pub mod probe;
pub mod retry;
pub mod script;

pub use character::Character;
pub use geometry::{CropRegion, ScaleFactors, WindowBounds};
pub use retry::RetryPolicy;
pub use script::{ClickSpot, MenuScript, MenuStep};
