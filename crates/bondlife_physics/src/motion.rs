use bondlife_core::{BOUNCE, BORDER_PUSH, BoundaryMode, PlayArea, SimConfig};

use crate::store::Particle;

/// Per-step kinematics and edge handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub drag: f32,
    pub max_speed: f32,
    /// Width of the margin in which reflective walls push inward
    pub border: f32,
    /// Inward nudge applied inside the margin
    pub push: f32,
    /// Velocity factor after bouncing off a wall
    pub bounce: f32,
}

impl Kinematics {
    pub fn from_config(cfg: &SimConfig) -> Self {
        Self {
            drag: cfg.drag,
            max_speed: cfg.max_speed,
            border: cfg.border,
            push: cfg.speed * BORDER_PUSH,
            bounce: BOUNCE,
        }
    }

    /// Move, damp and cap the speed, then apply the boundary policy
    pub fn advance(&self, p: &mut Particle, area: PlayArea, boundary: BoundaryMode) {
        p.position[0] += p.velocity[0];
        p.position[1] += p.velocity[1];
        p.velocity[0] *= self.drag;
        p.velocity[1] *= self.drag;

        let speed = p.speed();
        if speed > self.max_speed {
            p.velocity[0] *= self.max_speed / speed;
            p.velocity[1] *= self.max_speed / speed;
        }

        match boundary {
            BoundaryMode::Reflective => {
                for axis in 0..2 {
                    let extent = if axis == 0 { area.width } else { area.height };
                    self.reflect(&mut p.position[axis], &mut p.velocity[axis], extent);
                }
                p.position = area.clamp(p.position);
            }
            BoundaryMode::Toroidal => {
                p.position[0] = wrap(p.position[0], area.width);
                p.position[1] = wrap(p.position[1], area.height);
            }
        }
    }

    fn reflect(&self, x: &mut f32, v: &mut f32, extent: f32) {
        if *x < self.border {
            *v += self.push;
            if *x < 0.0 {
                *x = -*x;
                *v *= self.bounce;
            }
        } else if *x > extent - self.border {
            *v -= self.push;
            if *x > extent {
                *x = 2.0 * extent - *x;
                *v *= self.bounce;
            }
        }
    }
}

fn wrap(x: f32, extent: f32) -> f32 {
    let w = x.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if w >= extent { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlife_core::{ParticleId, ParticleKind};

    fn particle(pos: [f32; 2], vel: [f32; 2]) -> Particle {
        let mut p = Particle::new(ParticleId(0), ParticleKind(0), pos);
        p.velocity = vel;
        p
    }

    fn kin() -> Kinematics {
        Kinematics::from_config(&SimConfig::default())
    }

    const AREA: PlayArea = PlayArea { width: 1000.0, height: 600.0 };

    #[test]
    fn test_drag_and_speed_cap() {
        let mut p = particle([500.0, 300.0], [0.5, 0.0]);
        kin().advance(&mut p, AREA, BoundaryMode::Reflective);
        assert_eq!(p.position, [500.5, 300.0]);
        assert!((p.velocity[0] - 0.49).abs() < 1e-6);

        let mut fast = particle([500.0, 300.0], [3.0, 4.0]);
        kin().advance(&mut fast, AREA, BoundaryMode::Reflective);
        assert!((fast.speed() - 1.0).abs() < 1e-5);
        assert!((fast.velocity[0] - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_torus_wraps_with_velocity_unchanged() {
        let mut p = particle([999.9, 300.0], [0.5, 0.0]);
        kin().advance(&mut p, AREA, BoundaryMode::Toroidal);
        assert!((p.position[0] - 0.4).abs() < 1e-3);
        assert!((p.velocity[0] - 0.49).abs() < 1e-6);

        let mut up = particle([500.0, 0.2], [0.0, -0.5]);
        kin().advance(&mut up, AREA, BoundaryMode::Toroidal);
        assert!((up.position[1] - 599.7).abs() < 1e-3);
        assert!((up.velocity[1] - -0.49).abs() < 1e-6);
    }

    #[test]
    fn test_reflective_wall_bounces_at_half_speed() {
        let k = kin();
        let mut p = particle([999.9, 300.0], [0.5, 0.0]);
        k.advance(&mut p, AREA, BoundaryMode::Reflective);
        assert!((p.position[0] - 999.6).abs() < 1e-3);
        // damped, nudged inward, then reversed and halved
        let expected = (0.49 - k.push) * -0.5;
        assert!((p.velocity[0] - expected).abs() < 1e-6);
        assert!(p.velocity[0] < 0.0);
        assert!(AREA.contains(p.position));
    }

    #[test]
    fn test_reflective_left_and_top_walls() {
        let k = kin();
        let mut p = particle([0.3, 0.2], [-0.5, -0.5]);
        k.advance(&mut p, AREA, BoundaryMode::Reflective);
        assert!(p.position[0] >= 0.0 && p.position[1] >= 0.0);
        assert!(p.velocity[0] > 0.0 && p.velocity[1] > 0.0);
    }

    #[test]
    fn test_border_margin_pushes_inward() {
        let k = kin();
        let mut p = particle([10.0, 300.0], [0.0, 0.0]);
        k.advance(&mut p, AREA, BoundaryMode::Reflective);
        assert_eq!(p.velocity[0], k.push);

        let mut q = particle([500.0, 590.0], [0.0, 0.0]);
        k.advance(&mut q, AREA, BoundaryMode::Reflective);
        assert_eq!(q.velocity[1], -k.push);

        let mut free = particle([10.0, 300.0], [0.0, 0.0]);
        k.advance(&mut free, AREA, BoundaryMode::Toroidal);
        assert_eq!(free.velocity, [0.0, 0.0]);
    }

    #[test]
    fn test_far_overshoot_is_clamped() {
        let mut p = particle([500.0, 300.0], [0.0, 0.0]);
        p.position = [2500.0, -900.0];
        kin().advance(&mut p, AREA, BoundaryMode::Reflective);
        assert!(AREA.contains(p.position));
    }
}
