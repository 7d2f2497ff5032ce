//! Declarative menu-navigation script.
//!
//! The path from the title screen into the minigame is a fixed sequence of
//! clicks with fixed settle times. Keeping it as data instead of inline
//! literals makes the layout and timing assumptions auditable, and lets a
//! different menu path replace this one without touching control flow. It
//! is still a script, not a feedback loop: it assumes the menus render on
//! schedule.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{ScaleFactors, lower_half_anchor};

/// Where a scripted click lands, before scale resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClickSpot {
    /// Window-relative offset in window pixels, as-is.
    Fixed { x: f64, y: f64 },
    /// X as a fraction of the capture width, Y as a multiple of the
    /// lower-screen anchor. Proportional, so the spot survives rescaling.
    Anchored {
        width_frac: f64,
        lower_half_mult: f64,
    },
}

impl ClickSpot {
    /// Resolve to a window-relative offset in window pixels.
    pub fn resolve(
        &self,
        capture_width: u32,
        window_height: u32,
        scale: &ScaleFactors,
    ) -> (f64, f64) {
        match *self {
            ClickSpot::Fixed { x, y } => (x, y),
            ClickSpot::Anchored {
                width_frac,
                lower_half_mult,
            } => (
                capture_width as f64 * width_frac * scale.x,
                lower_half_anchor(window_height, scale.y) * lower_half_mult,
            ),
        }
    }
}

/// One scripted click plus the time the next menu needs to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuStep {
    pub name: String,
    pub spot: ClickSpot,
    pub settle: Duration,
}

impl MenuStep {
    pub fn new(name: impl Into<String>, spot: ClickSpot, settle: Duration) -> Self {
        Self {
            name: name.into(),
            spot,
            settle,
        }
    }
}

/// Ordered click sequence run once before the game loop starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuScript {
    pub steps: Vec<MenuStep>,
}

impl MenuScript {
    /// The path from the star screen to a running round of "Wanted!".
    pub fn wanted_minigame() -> Self {
        Self {
            steps: vec![
                // A throwaway click near the corner so the window is active.
                MenuStep::new(
                    "focus window",
                    ClickSpot::Fixed { x: 5.0, y: 5.0 },
                    Duration::from_millis(100),
                ),
                MenuStep::new(
                    "star",
                    ClickSpot::Anchored {
                        width_frac: 0.5,
                        lower_half_mult: 1.45,
                    },
                    Duration::from_secs(8),
                ),
                MenuStep::new(
                    "rec room",
                    ClickSpot::Anchored {
                        width_frac: 0.85,
                        lower_half_mult: 1.8,
                    },
                    Duration::from_millis(2500),
                ),
                MenuStep::new(
                    "wanted minigame",
                    ClickSpot::Anchored {
                        width_frac: 0.345,
                        lower_half_mult: 1.275,
                    },
                    Duration::from_secs(4),
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_script_has_the_four_menu_steps() {
        let script = MenuScript::wanted_minigame();
        let settles: Vec<Duration> = script.steps.iter().map(|s| s.settle).collect();
        assert_eq!(
            settles,
            vec![
                Duration::from_millis(100),
                Duration::from_secs(8),
                Duration::from_millis(2500),
                Duration::from_secs(4),
            ]
        );
        assert_eq!(script.steps[0].name, "focus window");
        assert_eq!(script.steps[3].name, "wanted minigame");
    }

    #[test]
    fn fixed_spots_ignore_the_scale() {
        let spot = ClickSpot::Fixed { x: 5.0, y: 5.0 };
        let scale = ScaleFactors { x: 2.0, y: 2.0 };
        assert_eq!(spot.resolve(256, 768, &scale), (5.0, 5.0));
    }

    #[test]
    fn anchored_spots_resolve_against_width_and_lower_screen() {
        // 256px capture of a 768px-tall window at 2x: the star click sits
        // at half the scaled width and 1.45 lower-screen anchors down.
        let spot = ClickSpot::Anchored {
            width_frac: 0.5,
            lower_half_mult: 1.45,
        };
        let scale = ScaleFactors { x: 2.0, y: 2.0 };
        let (x, y) = spot.resolve(256, 768, &scale);
        assert_eq!(x, 256.0);
        assert_eq!(y, 432.0 * 1.45);
    }

    #[test]
    fn scripts_round_trip_through_serde() {
        let script = MenuScript::wanted_minigame();
        let json = serde_json::to_string(&script).unwrap();
        let back: MenuScript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
    }
}
