use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wanted_bot::args::Args;
use wanted_bot::config::BotConfig;
use wanted_bot::controller::Controller;
use wanted_bot::desktop::{Desktop, NativeDesktop};
use wanted_cv::{DetectionConfig, YoloDetector};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    wait_for_operator(
        "*When you are happy with the window's position and ready to keep it in a single spot, \
         press [Enter] to continue.*",
    )?;

    info!(weights = %args.weights.display(), "loading detection model");
    let detector = YoloDetector::load(&args.weights, DetectionConfig::default())?;

    // Fail fast on a missing window, before any interaction is attempted.
    let mut desktop = NativeDesktop::new();
    let window = desktop.locate_window(&args.window_title)?;
    info!(
        title = window.title.as_str(),
        bounds = ?window.bounds,
        "found emulator window"
    );

    let mut controller = Controller::new(desktop, detector, window, BotConfig::default());
    controller.calibrate()?;

    wait_for_operator(
        "*We are ready to go! When you're ready, reset the game and press [Enter] to play once \
         you see the star!*",
    )?;

    controller.run()
}

fn wait_for_operator(prompt: &str) -> Result<()> {
    println!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(())
}
