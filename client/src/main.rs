mod camera;
mod config;
mod constants;
mod input;
mod shaders;
mod ui;
mod world;

use bevy::{prelude::*, window::PresentMode};
use clap::Parser;
use constants::WINDOW_TITLE;
use input::WaterInputPlugin;
use shared::sets::WaterUpdateSet;
use shared::water::{ClockMode, WaterConfig, WaterSimulation};
use shared::DEFAULT_SEED;
use std::path::PathBuf;
use ui::hud::debug::DebugHudPlugin;
use world::{SurfaceMode, WaterRenderSettings, WaterWorldPlugin};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, help = "RON file with water parameters, defaults are used if missing")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write the effective water parameters to this RON file")]
    write_config: Option<PathBuf>,

    #[arg(short, long, help = "Seed for splashes and scenery")]
    seed: Option<u64>,

    /// Evaluate the surface on the CPU instead of in the water shader
    #[arg(long)]
    cpu_surface: bool,

    /// Step the simulation by the measured frame time instead of a fixed 16 ms
    #[arg(long)]
    measured_clock: bool,
}

fn main() {
    let args = Args::parse();

    let mut water_config: WaterConfig = config::load_water_config(args.config.as_deref());
    if args.measured_clock {
        water_config.clock.mode = ClockMode::Measured;
    }
    if let Some(path) = args.write_config.as_deref() {
        config::save_water_config(&water_config, path);
    }

    let seed = args.seed.unwrap_or(DEFAULT_SEED);
    let render_settings = WaterRenderSettings {
        mode: if args.cpu_surface {
            SurfaceMode::Cpu
        } else {
            SurfaceMode::Gpu
        },
    };

    println!(
        "Starting water with seed {:#x}, {:?} surface, {:?} clock",
        seed, render_settings.mode, water_config.clock.mode
    );

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(WaterSimulation::from_config(&water_config, seed))
        .insert_resource(render_settings)
        .configure_sets(
            Update,
            (
                WaterUpdateSet::Input,
                WaterUpdateSet::Simulation,
                WaterUpdateSet::Rendering,
                WaterUpdateSet::Ui,
            )
                .chain(),
        )
        .add_plugins((WaterInputPlugin, WaterWorldPlugin, DebugHudPlugin))
        .add_systems(Startup, camera::spawn_camera)
        .add_systems(
            Update,
            camera::orbit_camera_system.in_set(WaterUpdateSet::Input),
        )
        .run();
}
