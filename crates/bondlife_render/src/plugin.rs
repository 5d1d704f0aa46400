use bevy::prelude::*;
use bondlife_sim::SimulationTickSet;

use super::camera;
use super::input;
use super::particles;
use super::ui;

/// Front end: camera, gizmo drawing, status bar and controls
pub struct BondlifeRenderPlugin;

impl Plugin for BondlifeRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ui::HudThrottle>()
            .init_resource::<ui::FpsCounter>()
            .init_resource::<ui::MatrixEditor>()
            .add_systems(Startup, (camera::spawn_camera, ui::spawn_status_bar))
            .add_systems(
                Update,
                (
                    input::keyboard_control_system,
                    input::mouse_click_system,
                    particles::draw_world,
                    ui::update_fps,
                    ui::update_status_bar,
                )
                    .chain()
                    .after(SimulationTickSet),
            );
    }
}
