use anyhow::Result;
use bevy::prelude::*;
use bondlife::cli::ConfigArgs;
use bondlife_render::BondlifeRenderPlugin;
use bondlife_sim::{SimulationClock, SimulationPlugin, SimulationState};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Interactive bonding particle-life simulation")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    let config = Cli::parse().config.load()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bondlife".into(),
                resolution: (config.width, config.height).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(SimulationClock::new(config.substeps))
        .insert_resource(SimulationState::new(config))
        .add_plugins(SimulationPlugin)
        .add_plugins(BondlifeRenderPlugin)
        .run();

    Ok(())
}
