use std::path::PathBuf;

use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

mod animation;
mod app;
mod audio;
mod coin;
mod error;
mod material;
mod renderer;
mod settings;
mod texture;
mod ui;

use app::{AppHandler, AssetPaths, LaunchOptions};
use settings::Settings;

pub const CONFY_APP_NAME: &str = "coinflip";

/// A 3D coin you can tilt with the mouse and flip with a click.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding coin_head.svg, coin_tail.svg and flip.wav
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Don't load or play the flip sound
    #[arg(long)]
    muted: bool,

    /// Overwrite saved settings with the defaults before starting
    #[arg(long)]
    reset_settings: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("coinflip=info"))
        .init();

    let args = Args::parse();

    let settings = if args.reset_settings {
        let defaults = Settings::default();
        defaults.save();
        log::info!("settings reset to defaults");
        defaults
    } else {
        Settings::load()
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler::new(
        LaunchOptions {
            assets: AssetPaths::in_dir(&args.assets),
            settings,
            muted: args.muted,
        },
        tokio::runtime::Runtime::new()?,
    );

    event_loop.run_app(&mut handler)?;

    if let Some(e) = handler.error.take() {
        return Err(e.into());
    }
    Ok(())
}
