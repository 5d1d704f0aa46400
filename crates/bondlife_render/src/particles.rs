use bevy::math::Isometry2d;
use bevy::prelude::*;
use bondlife_core::ParticleKind;
use bondlife_sim::SimulationState;

/// Glow rings drawn around each particle, as (radius in particle radii, alpha)
const HALO: [(f32, f32); 3] = [(2.0, 0.30), (3.0, 0.16), (4.0, 0.07)];

/// Display colour of a particle kind. The first three match the classic
/// palette; further kinds are spread around the hue wheel.
pub fn kind_color(kind: ParticleKind) -> Color {
    match kind.0 {
        0 => Color::srgb(1.0, 0.0, 1.0),
        1 => Color::srgb(1.0, 1.0, 1.0),
        2 => Color::srgb(0.0, 1.0, 1.0),
        n => Color::hsl((n as f32 * 47.0) % 360.0, 0.9, 0.6),
    }
}

/// Average of two kind colours, used for bond lines
pub fn blend(a: ParticleKind, b: ParticleKind) -> Color {
    kind_color(a).mix(&kind_color(b), 0.5)
}

/// Simulation coordinates (origin top-left, y down) to world coordinates
/// (origin at the centre of the `view`-sized field, y up)
pub fn to_world(pos: [f32; 2], view: Vec2) -> Vec2 {
    Vec2::new(pos[0] - view.x / 2.0, view.y / 2.0 - pos[1])
}

/// Draw halos, bonds and particles for the current state
pub fn draw_world(state: Res<SimulationState>, mut gizmos: Gizmos) {
    let cfg = state.config();
    let view = Vec2::new(cfg.width, cfg.height);
    let r = cfg.particle_radius;

    for p in state.particles() {
        let at = Isometry2d::from_translation(to_world(p.position, view));
        let color = kind_color(p.kind);
        for (scale, alpha) in HALO {
            gizmos.circle_2d(at, r * scale, color.with_alpha(alpha));
        }
    }

    for seg in state.bond_segments() {
        gizmos.line_2d(
            to_world(seg.from, view),
            to_world(seg.to, view),
            blend(seg.kinds.0, seg.kinds.1),
        );
    }

    for p in state.particles() {
        let at = Isometry2d::from_translation(to_world(p.position, view));
        let color = kind_color(p.kind);
        gizmos.circle_2d(at, r, color);
        gizmos.circle_2d(at, r * 0.5, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_world_flips_y_about_centre() {
        let view = Vec2::new(1920.0, 1080.0);
        assert_eq!(to_world([0.0, 0.0], view), Vec2::new(-960.0, 540.0));
        assert_eq!(to_world([960.0, 540.0], view), Vec2::ZERO);
        assert_eq!(to_world([1920.0, 1040.0], view), Vec2::new(960.0, -500.0));
    }

    #[test]
    fn test_palette_is_distinct() {
        let colors: Vec<_> = (0..6).map(|k| kind_color(ParticleKind(k)).to_srgba()).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
