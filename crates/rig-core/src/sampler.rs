use crate::config::SmoothingConfig;
use crate::error::SampleRejected;

/// Latest accepted pointer position, normalized to `[-1, 1]` and scaled by
/// sensitivity. `y` points up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawSample {
    pub x: f32,
    pub y: f32,
}

/// One pointer-move event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
    /// Host timestamp in milliseconds, monotonic within a session.
    pub time_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Map a pointer position onto `[-sensitivity, sensitivity]` on both axes,
/// with screen-down inverted to world-up.
#[inline]
pub fn normalize(client_x: f32, client_y: f32, viewport: Viewport, sensitivity: f32) -> RawSample {
    RawSample {
        x: (client_x / viewport.width * 2.0 - 1.0) * sensitivity,
        y: (-(client_y / viewport.height) * 2.0 + 1.0) * sensitivity,
    }
}

/// Normalizes and throttles pointer events into a single stored [`RawSample`].
#[derive(Clone, Debug)]
pub struct InputSampler {
    sensitivity: f32,
    throttle_ms: f64,
    raw: Option<RawSample>,
    last_accepted_ms: Option<f64>,
}

impl InputSampler {
    pub fn new(cfg: &SmoothingConfig) -> Self {
        Self {
            sensitivity: cfg.sensitivity,
            throttle_ms: cfg.throttle_ms,
            raw: None,
            last_accepted_ms: None,
        }
    }

    /// Stored raw value, or `None` before the first accepted event.
    pub fn raw(&self) -> Option<RawSample> {
        self.raw
    }

    /// Stored raw value, treating "no input yet" as the origin.
    pub fn current(&self) -> RawSample {
        self.raw.unwrap_or_default()
    }

    /// Accept `event` if it passes the throttle and degenerate-input guards,
    /// otherwise leave the stored value untouched. Returns the stored value
    /// either way.
    pub fn sample(&mut self, event: PointerSample, viewport: Viewport) -> RawSample {
        if let Err(reason) = self.try_sample(event, viewport) {
            log::trace!("[sampler] dropped: {}", reason);
        }
        self.current()
    }

    pub fn try_sample(
        &mut self,
        event: PointerSample,
        viewport: Viewport,
    ) -> Result<RawSample, SampleRejected> {
        if viewport.is_degenerate() {
            return Err(SampleRejected::DegenerateViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !(event.client_x.is_finite() && event.client_y.is_finite()) {
            return Err(SampleRejected::NonFinite {
                x: event.client_x,
                y: event.client_y,
            });
        }
        if let Some(last) = self.last_accepted_ms {
            let elapsed_ms = event.time_ms - last;
            // A clock that went backwards is not a reason to drop input.
            if elapsed_ms >= 0.0 && elapsed_ms < self.throttle_ms {
                return Err(SampleRejected::Throttled {
                    elapsed_ms,
                    throttle_ms: self.throttle_ms,
                });
            }
        }

        let next = normalize(event.client_x, event.client_y, viewport, self.sensitivity);
        if !(next.x.is_finite() && next.y.is_finite()) {
            return Err(SampleRejected::NonFinite {
                x: event.client_x,
                y: event.client_y,
            });
        }
        self.raw = Some(next);
        self.last_accepted_ms = Some(event.time_ms);
        Ok(next)
    }
}
