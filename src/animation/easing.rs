/// Easing curve applied to the progress of a timed animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    /// The standard `ease` curve, a cubic Bézier through (0.42, 0) and (1, 1).
    #[default]
    Ease,
    /// Arbitrary cubic Bézier with control points (x1, y1) and (x2, y2).
    CubicBezier(f64, f64, f64, f64),
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-3;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 24;

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    ///
    /// Input outside the unit interval is clamped, and the endpoints are
    /// always exact so a finished animation lands on its target.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Ease => bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => bezier(x1, y1, x2, y2, t),
        }
    }
}

/// One coordinate of a cubic Bézier anchored at 0 and 1.
fn coordinate(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    (3.0 * u * u * t).mul_add(p1, 3.0 * u * t * t * p2) + t * t * t
}

fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    (3.0 * u * u).mul_add(p1, 6.0 * u * t * (p2 - p1)) + 3.0 * t * t * (1.0 - p2)
}

fn bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if (x1 - y1).abs() < f64::EPSILON && (x2 - y2).abs() < f64::EPSILON {
        return x;
    }
    coordinate(solve_t_for_x(x, x1, x2), y1, y2)
}

fn solve_t_for_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let d = slope(t, x1, x2);
        if d.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        let err = coordinate(t, x1, x2) - x;
        if err.abs() < SUBDIVISION_PRECISION {
            return t;
        }
        t -= err / d;
    }

    // Newton stalled on a flat section; fall back to bisection.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    t = x;
    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        let err = coordinate(t, x1, x2) - x;
        if err.abs() < SUBDIVISION_PRECISION {
            break;
        }
        if err > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::Ease, Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_starts_slow() {
        // ease-in shape: progress lags behind time early on
        let early = Easing::Ease.apply(0.25);
        assert!(early < 0.25, "got {early}");
        assert!(early > 0.0);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut last = 0.0;
        for step in 1..=100 {
            let value = Easing::Ease.apply(f64::from(step) / 100.0);
            assert!(value >= last, "not monotonic at step {step}");
            last = value;
        }
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let easing = Easing::CubicBezier(0.3, 0.3, 0.7, 0.7);
        assert!((easing.apply(0.4) - 0.4).abs() < 1e-9);
    }
}
