use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bondlife_core::ParticleKind;
use bondlife_sim::SimulationState;

use super::ui::MatrixEditor;

const KIND_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Handle keyboard controls
pub fn keyboard_control_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<SimulationState>,
    mut editor: ResMut<MatrixEditor>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
        return;
    }
    if keyboard.just_pressed(KeyCode::Space) {
        state.toggle_pause();
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        state.reset();
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        state.clear();
    }
    if keyboard.just_pressed(KeyCode::KeyB) {
        state.toggle_boundary();
    }
    for (k, key) in KIND_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            state.select_kind(ParticleKind(k as u8));
        }
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        editor.toggle();
        return;
    }
    if !editor.editing {
        return;
    }

    let kinds = state.kinds();
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        editor.move_cursor(-1, 0, kinds);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        editor.move_cursor(1, 0, kinds);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        editor.move_cursor(0, -1, kinds);
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        editor.move_cursor(0, 1, kinds);
    }

    let step = state.config().matrix_step;
    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        state.nudge_coupling(editor.row, editor.col, step);
    }
    if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        state.nudge_coupling(editor.row, editor.col, -step);
    }
    if keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        editor.editing = false;
    }
}

/// Map a cursor position in window pixels to simulation coordinates.
/// Both use a top-left origin; the camera stretches the configured field over
/// the window, so only the scale differs after a resize.
pub fn cursor_to_sim(cursor: Vec2, window: Vec2, world: Vec2) -> [f32; 2] {
    let sx = if window.x > 0.0 { world.x / window.x } else { 1.0 };
    let sy = if window.y > 0.0 { world.y / window.y } else { 1.0 };
    [cursor.x * sx, cursor.y * sy]
}

/// Left click removes the particle under the cursor or places a new one
pub fn mouse_click_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<SimulationState>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let world = Vec2::new(state.config().width, state.config().height);
    let pos = cursor_to_sim(cursor, window.size(), world);
    state.click(pos);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_maps_one_to_one_at_native_size() {
        let size = Vec2::new(1920.0, 1080.0);
        assert_eq!(cursor_to_sim(Vec2::new(100.0, 200.0), size, size), [100.0, 200.0]);
    }

    #[test]
    fn test_cursor_scales_after_resize() {
        let world = Vec2::new(1920.0, 1080.0);
        let window = Vec2::new(960.0, 540.0);
        assert_eq!(cursor_to_sim(Vec2::new(100.0, 200.0), window, world), [200.0, 400.0]);
    }
}
