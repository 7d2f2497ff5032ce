//! Plays the "Wanted!" minigame inside a DS emulator window, hands-off.
//!
//! The pipeline per round: capture the emulator window, ask the color
//! probe which character the poster wants, ask the detector where that
//! character is on the lower screen, map the box back to physical screen
//! coordinates and click it. The OS side lives behind [`desktop::Desktop`]
//! so the whole loop runs against fakes in tests.

pub mod args;
pub mod config;
pub mod controller;
pub mod desktop;
