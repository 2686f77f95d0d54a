use crate::constants::SMOOTHING_EPSILON;
use crate::sampler::RawSample;

/// Move `prev` toward `target` by `factor` of the remaining distance.
///
/// A factor of 1 or more lands on `target` exactly, so a full jump leaves no
/// floating-point residue.
#[inline]
pub fn advance(prev: f32, target: f32, factor: f32) -> f32 {
    if factor >= 1.0 {
        return target;
    }
    prev + (target - prev) * factor
}

/// Exponentially filtered pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedState {
    pub x: f32,
    pub y: f32,
}

/// Pure filter step. Returns `None` when the state should be left as is: both
/// axes already within epsilon of the target, or the step would not be
/// finite.
pub fn step_towards(prev: SmoothedState, target: RawSample, factor: f32) -> Option<SmoothedState> {
    let dx = target.x - prev.x;
    let dy = target.y - prev.y;
    if dx.abs() < SMOOTHING_EPSILON && dy.abs() < SMOOTHING_EPSILON {
        return None;
    }
    let next = SmoothedState {
        x: advance(prev.x, target.x, factor),
        y: advance(prev.y, target.y, factor),
    };
    (next.x.is_finite() && next.y.is_finite()).then_some(next)
}

/// Holds the smoothed value between ticks. Never halts itself: a tick where
/// nothing moves is simply a no-op.
#[derive(Clone, Debug)]
pub struct SmoothingFilter {
    factor: f32,
    state: SmoothedState,
}

impl SmoothingFilter {
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            state: SmoothedState::default(),
        }
    }

    pub fn state(&self) -> SmoothedState {
        self.state
    }

    /// Advance one tick toward `target`. Returns whether the stored value
    /// changed.
    pub fn step(&mut self, target: RawSample) -> bool {
        match step_towards(self.state, target, self.factor) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}
