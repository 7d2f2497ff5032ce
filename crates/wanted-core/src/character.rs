//! The four characters the minigame can put on the wanted poster.

use serde::{Deserialize, Serialize};

/// One of the four recognizable wanted characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Luigi,
    Mario,
    Yoshi,
    Wario,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::Luigi,
        Character::Mario,
        Character::Yoshi,
        Character::Wario,
    ];

    /// The label the detection model was trained with.
    pub fn label(&self) -> &'static str {
        match self {
            Character::Luigi => "luigi",
            Character::Mario => "mario",
            Character::Yoshi => "yoshi",
            Character::Wario => "wario",
        }
    }

    pub fn from_label(label: &str) -> Option<Character> {
        Character::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Reference RGB for the probe pixel: the bottom of the character's hat
    /// brim, or Yoshi's eyebrows.
    pub fn reference_color(&self) -> (u8, u8, u8) {
        match self {
            Character::Luigi => (26, 114, 18),
            Character::Mario => (222, 8, 8),
            Character::Yoshi => (36, 136, 31),
            Character::Wario => (255, 214, 8),
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Euclidean distance between two colors in RGB space.
pub fn color_distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> f64 {
    let dr = a.0 as f64 - b.0 as f64;
    let dg = a.1 as f64 - b.1 as f64;
    let db = a.2 as f64 - b.2 as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}
