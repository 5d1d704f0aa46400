use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bondlife_sim::SimulationState;

/// Orthographic projection that always shows `view` world units, stretched
/// to whatever size the window has. Drawing and cursor mapping both scale by
/// config size over window size.
pub fn fixed_projection(view: Vec2) -> OrthographicProjection {
    OrthographicProjection {
        scaling_mode: ScalingMode::Fixed {
            width: view.x,
            height: view.y,
        },
        ..OrthographicProjection::default_2d()
    }
}

/// Spawn the 2D camera framing the configured play field
pub fn spawn_camera(mut commands: Commands, state: Res<SimulationState>) {
    let cfg = state.config();
    commands.spawn((Camera2d, fixed_projection(Vec2::new(cfg.width, cfg.height))));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::cursor_to_sim;
    use crate::particles::to_world;
    use bevy::render::camera::CameraProjection;

    /// World point to window pixels (top-left origin) through the projection
    fn to_screen(projection: &OrthographicProjection, world: Vec2, window: Vec2) -> Vec2 {
        let ndc = projection.get_clip_from_view().project_point3(world.extend(0.0));
        Vec2::new((ndc.x + 1.0) / 2.0 * window.x, (1.0 - ndc.y) / 2.0 * window.y)
    }

    fn assert_near(a: [f32; 2], b: [f32; 2]) {
        assert!((a[0] - b[0]).abs() < 1e-2 && (a[1] - b[1]).abs() < 1e-2, "{a:?} != {b:?}");
    }

    #[test]
    fn test_sim_to_screen_and_back_after_resize() {
        let view = Vec2::new(1920.0, 1080.0);
        for window in [view, Vec2::new(960.0, 540.0), Vec2::new(1280.0, 1024.0)] {
            let mut projection = fixed_projection(view);
            projection.update(window.x, window.y);
            for sim in [[200.0, 400.0], [0.0, 0.0], [1919.0, 1039.0], [960.0, 540.0]] {
                let screen = to_screen(&projection, to_world(sim, view), window);
                assert_near(cursor_to_sim(screen, window, view), sim);
            }
        }
    }

    #[test]
    fn test_half_size_window_shows_whole_field() {
        let view = Vec2::new(1920.0, 1080.0);
        let window = Vec2::new(960.0, 540.0);
        let mut projection = fixed_projection(view);
        projection.update(window.x, window.y);

        let screen = to_screen(&projection, to_world([200.0, 400.0], view), window);
        assert_near(screen.to_array(), [100.0, 200.0]);
        let corner = to_screen(&projection, to_world([1920.0, 1080.0], view), window);
        assert_near(corner.to_array(), [960.0, 540.0]);
    }
}
