//! Animated numeric values.
//!
//! An [`AnimatedValue`] holds the current value of some visual quantity and,
//! while animating, the motion that drives it. Nothing advances on its own:
//! the owner calls [`AnimatedValue::advance`] once per frame with the frame
//! timestamp. Starting a new motion always supersedes the running one, and
//! a superseded motion never reports completion.

mod easing;
mod spring;

use std::time::{Duration, Instant};

pub use easing::Easing;
pub use spring::SpringConfig;
use spring::SpringMotion;

/// Outcome of advancing an animated value by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// No motion is running.
    Idle,
    /// A motion is running and has not reached its target yet.
    Running,
    /// The running motion reached its target on this frame.
    Finished,
}

impl Advance {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
}

impl Timing {
    fn sample(&self, elapsed: Duration) -> (f64, bool) {
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(progress);
        ((self.to - self.from).mul_add(eased, self.from), false)
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Timing(Timing),
    Spring(SpringMotion),
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    kind: Kind,
    started_at: Instant,
}

/// Snapshot of a motion at a given instant.
struct Sample {
    value: f64,
    velocity: f64,
    done: bool,
}

impl Motion {
    const fn target(&self) -> f64 {
        match &self.kind {
            Kind::Timing(timing) => timing.to,
            Kind::Spring(spring) => spring.to,
        }
    }

    fn sample(&self, now: Instant) -> Sample {
        let elapsed = now.saturating_duration_since(self.started_at);
        match &self.kind {
            Kind::Timing(timing) => {
                let (value, done) = timing.sample(elapsed);
                Sample {
                    value,
                    velocity: 0.0,
                    done,
                }
            }
            Kind::Spring(spring) => {
                let (value, velocity) = spring.sample(elapsed.as_secs_f64());
                if spring.is_at_rest(value, velocity) {
                    Sample {
                        value: spring.to,
                        velocity: 0.0,
                        done: true,
                    }
                } else {
                    Sample {
                        value,
                        velocity,
                        done: false,
                    }
                }
            }
        }
    }
}

/// A numeric value whose changes are interpolated over time.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    value: f64,
    velocity: f64,
    motion: Option<Motion>,
}

impl AnimatedValue {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            motion: None,
        }
    }

    /// Value as of the last [`advance`](Self::advance) or start.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Where the value is heading, or the value itself when at rest.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.motion.map_or(self.value, |motion| motion.target())
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Animate towards `to` over a fixed duration.
    pub fn start_timing(&mut self, to: f64, duration: Duration, easing: Easing, now: Instant) {
        self.catch_up(now);
        self.motion = Some(Motion {
            kind: Kind::Timing(Timing {
                from: self.value,
                to,
                duration,
                easing,
            }),
            started_at: now,
        });
    }

    /// Spring towards `to`, keeping the current velocity.
    pub fn start_spring(&mut self, to: f64, config: SpringConfig, now: Instant) {
        self.catch_up(now);
        self.motion = Some(Motion {
            kind: Kind::Spring(SpringMotion::new(self.value, to, self.velocity, config)),
            started_at: now,
        });
    }

    /// Stop wherever the value currently is.
    pub fn cancel(&mut self, now: Instant) {
        self.catch_up(now);
        self.motion = None;
        self.velocity = 0.0;
    }

    pub fn advance(&mut self, now: Instant) -> Advance {
        let Some(motion) = self.motion else {
            return Advance::Idle;
        };
        let sample = motion.sample(now);
        self.value = sample.value;
        self.velocity = sample.velocity;
        if sample.done {
            self.motion = None;
            self.velocity = 0.0;
            Advance::Finished
        } else {
            Advance::Running
        }
    }

    /// Bring value and velocity up to `now` without finishing the motion, so
    /// a replacement starts from where the old one actually is.
    fn catch_up(&mut self, now: Instant) {
        if let Some(motion) = self.motion {
            let sample = motion.sample(now);
            self.value = sample.value;
            self.velocity = sample.velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_idle_value_does_not_move() {
        let mut value = AnimatedValue::new(3.0);
        assert_eq!(value.advance(Instant::now()), Advance::Idle);
        assert_eq!(value.value(), 3.0);
        assert_eq!(value.target(), 3.0);
    }

    #[test]
    fn test_timing_reaches_target_and_finishes_once() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.start_timing(150.0, 300 * MS, Easing::Ease, start);
        assert_eq!(value.target(), 150.0);

        assert_eq!(value.advance(start + 150 * MS), Advance::Running);
        let halfway = value.value();
        assert!(halfway > 0.0 && halfway < 150.0);

        assert_eq!(value.advance(start + 300 * MS), Advance::Finished);
        assert_eq!(value.value(), 150.0);
        assert_eq!(value.advance(start + 400 * MS), Advance::Idle);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_frame() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.start_timing(10.0, Duration::ZERO, Easing::Linear, start);
        assert_eq!(value.advance(start), Advance::Finished);
        assert_eq!(value.value(), 10.0);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.start_timing(100.0, 100 * MS, Easing::Linear, start);
        value.advance(start + 50 * MS);

        // retarget later than the last frame; catches up before reversing
        value.start_timing(0.0, 100 * MS, Easing::Linear, start + 60 * MS);
        assert!((value.value() - 60.0).abs() < 1e-9);
        assert_eq!(value.advance(start + 110 * MS), Advance::Running);
        assert!((value.value() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_superseded_motion_never_finishes() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.start_timing(1.0, 100 * MS, Easing::Linear, start);
        value.start_timing(2.0, 500 * MS, Easing::Linear, start + 10 * MS);
        // the first motion would have ended here
        assert_eq!(value.advance(start + 150 * MS), Advance::Running);
    }

    #[test]
    fn test_cancel_freezes_value() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.start_timing(100.0, 100 * MS, Easing::Linear, start);
        value.cancel(start + 25 * MS);
        assert!(!value.is_animating());
        assert!((value.value() - 25.0).abs() < 1e-9);
        assert_eq!(value.advance(start + 200 * MS), Advance::Idle);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(1.0);
        value.start_spring(0.95, SpringConfig::default(), start);
        assert_eq!(value.advance(start + 16 * MS), Advance::Running);
        assert!(value.value() < 1.0);
        assert_eq!(value.advance(start + 5000 * MS), Advance::Finished);
        assert_eq!(value.value(), 0.95);
    }

    #[test]
    fn test_spring_retarget_keeps_velocity() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(1.0);
        value.start_spring(0.95, SpringConfig::default(), start);
        value.advance(start + 30 * MS);
        let before = value.value();

        // heading down with velocity; the reversed spring keeps going down first
        value.start_spring(1.0, SpringConfig::default(), start + 30 * MS);
        value.advance(start + 32 * MS);
        assert!(value.value() < before);
    }
}
