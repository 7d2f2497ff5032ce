//! Command line surface.

use std::path::PathBuf;

use clap::Parser;

/// Plays the "Wanted!" minigame on a DS emulator.
///
/// Keep the emulator window frontmost, fully visible and untouched for the
/// whole run; the bot owns the mouse once it starts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the trained object-detection model weights (ONNX export)
    #[arg(
        long,
        value_name = "FILE",
        default_value = "runs/train/exp/weights/best.onnx"
    )]
    pub weights: PathBuf,

    /// Whether to narrate progress to the shell
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub verbose: bool,

    /// Substring of the emulator window title to latch onto
    #[arg(long, value_name = "TITLE", default_value = "DeSmuME")]
    pub window_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_setup() {
        let args = Args::parse_from(["wanted-bot"]);
        assert_eq!(
            args.weights,
            PathBuf::from("runs/train/exp/weights/best.onnx")
        );
        assert!(args.verbose);
        assert_eq!(args.window_title, "DeSmuME");
    }

    #[test]
    fn verbose_can_be_switched_off() {
        let args = Args::parse_from(["wanted-bot", "--verbose", "false"]);
        assert!(!args.verbose);
    }
}
