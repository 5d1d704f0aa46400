use bevy::prelude::*;
use bondlife_core::ParticleKind;
use bondlife_sim::SimulationState;

use super::particles::kind_color;

const LABEL: Color = Color::srgb(0.78, 0.78, 0.78);
const DIM: Color = Color::srgb(0.4, 0.4, 0.4);
const ALERT: Color = Color::srgb(1.0, 0.0, 0.0);
const GO: Color = Color::srgb(0.0, 1.0, 0.0);
const CURSOR: Color = Color::srgb(1.0, 1.0, 0.0);
const FONT_SIZE: f32 = 20.0;

/// Coupling-matrix editor mode and its cursor
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct MatrixEditor {
    pub editing: bool,
    pub row: usize,
    pub col: usize,
}

impl MatrixEditor {
    pub fn toggle(&mut self) {
        self.editing = !self.editing;
    }

    /// Move the cursor, wrapping around a `kinds` x `kinds` matrix
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize, kinds: usize) {
        if kinds == 0 {
            return;
        }
        let k = kinds as isize;
        self.row = (self.row as isize + d_row).rem_euclid(k) as usize;
        self.col = (self.col as isize + d_col).rem_euclid(k) as usize;
    }

    pub fn is_cursor(&self, row: usize, col: usize) -> bool {
        self.editing && self.row == row && self.col == col
    }
}

/// Exponentially smoothed frame rate
#[derive(Resource, Debug, Default)]
pub struct FpsCounter {
    pub fps: f32,
}

impl FpsCounter {
    pub fn sample(&mut self, delta_secs: f32) {
        if delta_secs > 0.0 {
            self.fps = 0.9 * self.fps + 0.1 / delta_secs;
        }
    }
}

/// HUD frame counter for throttling the FPS readout
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// One live piece of the status bar
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Count,
    Pause,
    Boundary,
    Kind(usize),
    Cell(usize, usize),
    Fps,
}

/// Spawn the bottom status bar:
/// `N | SPC | B | commands | T | Matrix | FPS`
pub fn spawn_status_bar(mut commands: Commands, state: Res<SimulationState>) {
    let kinds = state.kinds();
    let margin = state.config().ui_margin;

    let span = |text: String, color: Color| {
        (
            TextSpan::new(text),
            TextFont {
                font_size: FONT_SIZE,
                ..default()
            },
            TextColor(color),
        )
    };

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(margin),
                padding: UiRect::horizontal(Val::Px(10.0)),
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK),
        ))
        .with_children(|bar| {
            bar.spawn((
                Text::new(""),
                TextFont {
                    font_size: FONT_SIZE,
                    ..default()
                },
                TextColor(LABEL),
            ))
            .with_children(|text| {
                text.spawn((span("N:0".into(), LABEL), StatusField::Count));
                text.spawn(span(" | SPC:".into(), LABEL));
                text.spawn((span("RUNNING".into(), GO), StatusField::Pause));
                text.spawn(span(" | B:".into(), LABEL));
                text.spawn((span("BORDERS".into(), ALERT), StatusField::Boundary));
                text.spawn(span(
                    " | MOUSE:draw R:reset C:clear M:matrix ESC:exit | T:".into(),
                    LABEL,
                ));
                for k in 0..kinds {
                    text.spawn((span(format!("{} ", k + 1), DIM), StatusField::Kind(k)));
                }
                text.spawn(span("| Matrix: ".into(), LABEL));
                for i in 0..kinds {
                    let row = kind_color(ParticleKind(i as u8));
                    if i > 0 {
                        text.spawn(span(", ".into(), LABEL));
                    }
                    text.spawn(span("[".into(), row));
                    for j in 0..kinds {
                        if j > 0 {
                            text.spawn(span(", ".into(), LABEL));
                        }
                        text.spawn((span(String::new(), LABEL), StatusField::Cell(i, j)));
                    }
                    text.spawn(span("]".into(), row));
                }
                text.spawn(span(" | FPS: ".into(), LABEL));
                text.spawn((span("0.00".into(), DIM), StatusField::Fps));
            });
        });
}

pub fn update_fps(time: Res<Time>, mut fps: ResMut<FpsCounter>) {
    fps.sample(time.delta_secs());
}

/// Refresh the status bar. Everything but the FPS readout updates each frame.
pub fn update_status_bar(
    state: Res<SimulationState>,
    editor: Res<MatrixEditor>,
    fps: Res<FpsCounter>,
    mut throttle: ResMut<HudThrottle>,
    mut fields: Query<(&mut TextSpan, &mut TextColor, &StatusField)>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    let refresh_fps = throttle.frame % 10 == 0;

    for (mut span, mut color, field) in fields.iter_mut() {
        match *field {
            StatusField::Count => {
                **span = format!("N:{}", state.particle_count());
            }
            StatusField::Pause => {
                let (text, c) = if state.is_paused() { ("PAUSED", ALERT) } else { ("RUNNING", GO) };
                **span = text.to_string();
                color.0 = c;
            }
            StatusField::Boundary => {
                color.0 = match state.boundary() {
                    bondlife_core::BoundaryMode::Reflective => ALERT,
                    bondlife_core::BoundaryMode::Toroidal => GO,
                };
            }
            StatusField::Kind(k) => {
                let kind = ParticleKind(k as u8);
                color.0 = if state.selected_kind() == kind { kind_color(kind) } else { DIM };
            }
            StatusField::Cell(i, j) => {
                **span = format!("{:.1}", state.coupling().get(i, j));
                color.0 = if editor.is_cursor(i, j) {
                    CURSOR
                } else {
                    kind_color(ParticleKind(j as u8))
                };
            }
            StatusField::Fps => {
                if refresh_fps {
                    **span = format!("{:.2}", fps.fps);
                }
            }
        }
    }
}
