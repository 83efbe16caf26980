// src/main.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use galleria::{app, AppOptions};
use galleria::config::ScenePreset;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    /// Warm daytime gallery
    Classic,
    /// Cooler evening variant
    Dusk,
}

#[derive(Parser, Debug)]
#[command(name = "galleria", about = "Interactive 3D gallery room")]
struct Args {
    /// Scene preset to load
    #[arg(long, value_enum, default_value_t = PresetArg::Classic)]
    preset: PresetArg,

    /// Directory containing textures, the statue model, and audio files
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Disable music and click sounds
    #[arg(long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let preset = match args.preset {
        PresetArg::Classic => ScenePreset::classic(),
        PresetArg::Dusk => ScenePreset::dusk(),
    };
    log::info!("starting with preset '{}'", preset.name);

    app(AppOptions {
        preset,
        assets_dir: args.assets,
        mute: args.mute,
    })
    .run();

    Ok(())
}
