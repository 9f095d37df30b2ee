use serde::{Deserialize, Serialize};

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_displacement: f64,
    pub rest_speed: f64,
}

impl SpringConfig {
    /// Build a spring from the tension/friction pair used by Origami-style
    /// springs.
    #[must_use]
    pub fn from_tension_friction(tension: f64, friction: f64) -> Self {
        Self {
            stiffness: (tension - 30.0).mul_add(3.62, 194.0),
            damping: (friction - 8.0).mul_add(3.0, 25.0),
            ..Self::default()
        }
    }

    /// Damping ratio. Below 1 the spring overshoots.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    /// Tension 40, friction 7.
    fn default() -> Self {
        Self {
            stiffness: 230.2,
            damping: 22.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }
}

/// A spring released from `from` towards `to` with an initial velocity.
///
/// Position is evaluated in closed form, so sampling is independent of the
/// frame rate.
#[derive(Debug, Clone, Copy)]
pub(super) struct SpringMotion {
    pub to: f64,
    displacement: f64,
    velocity: f64,
    config: SpringConfig,
}

impl SpringMotion {
    pub fn new(from: f64, to: f64, velocity: f64, config: SpringConfig) -> Self {
        Self {
            to,
            displacement: from - to,
            velocity,
            config,
        }
    }

    /// Position and velocity `t` seconds after release.
    pub fn sample(&self, t: f64) -> (f64, f64) {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        if stiffness <= 0.0 || mass <= 0.0 {
            return (self.to, 0.0);
        }

        let omega0 = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());
        let d0 = self.displacement;
        let v0 = self.velocity;

        let (d, v) = if zeta < 1.0 {
            let omega1 = omega0 * zeta.mul_add(-zeta, 1.0).sqrt();
            let decay = zeta * omega0;
            let envelope = (-decay * t).exp();
            let b = decay.mul_add(d0, v0) / omega1;
            let (sin, cos) = (omega1 * t).sin_cos();
            (
                envelope * d0.mul_add(cos, b * sin),
                envelope * v0.mul_add(cos, -(decay.mul_add(b, omega1 * d0)) * sin),
            )
        } else if (zeta - 1.0).abs() < 1e-9 {
            let envelope = (-omega0 * t).exp();
            let b = omega0.mul_add(d0, v0);
            (
                envelope * b.mul_add(t, d0),
                envelope * (omega0 * b).mul_add(-t, v0),
            )
        } else {
            let root = zeta.mul_add(zeta, -1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            let c1 = r2.mul_add(-d0, v0) / (r1 - r2);
            let c2 = d0 - c1;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1.mul_add(e1, c2 * e2), (r1 * c1).mul_add(e1, r2 * c2 * e2))
        };

        (self.to + d, v)
    }

    pub fn is_at_rest(&self, position: f64, velocity: f64) -> bool {
        (position - self.to).abs() <= self.config.rest_displacement
            && velocity.abs() <= self.config.rest_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_tension_friction() {
        let derived = SpringConfig::from_tension_friction(40.0, 7.0);
        assert!((derived.stiffness - 230.2).abs() < 1e-9);
        assert!((derived.damping - 22.0).abs() < 1e-9);
        assert!(derived.damping_ratio() < 1.0);
    }

    #[test]
    fn test_starts_at_origin_with_initial_velocity() {
        let motion = SpringMotion::new(1.0, 0.95, 0.3, SpringConfig::default());
        let (position, velocity) = motion.sample(0.0);
        assert!((position - 1.0).abs() < 1e-12);
        assert!((velocity - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_underdamped_settles() {
        let motion = SpringMotion::new(1.0, 0.95, 0.0, SpringConfig::default());
        let (position, velocity) = motion.sample(3.0);
        assert!(motion.is_at_rest(position, velocity));
    }

    #[test]
    fn test_critical_and_overdamped_settle_without_overshoot() {
        for damping in [2.0 * 230.2_f64.sqrt(), 80.0] {
            let config = SpringConfig {
                damping,
                ..SpringConfig::default()
            };
            let motion = SpringMotion::new(1.0, 0.95, 0.0, config);
            for step in 0..200 {
                let (position, _) = motion.sample(f64::from(step) * 0.01);
                assert!(position >= 0.95 - 1e-9, "overshoot with damping {damping}");
            }
            let (position, velocity) = motion.sample(5.0);
            assert!(motion.is_at_rest(position, velocity));
        }
    }

    #[test]
    fn test_zero_stiffness_snaps() {
        let config = SpringConfig {
            stiffness: 0.0,
            ..SpringConfig::default()
        };
        let motion = SpringMotion::new(1.0, 0.5, 0.0, config);
        assert_eq!(motion.sample(0.0), (0.5, 0.0));
    }
}
