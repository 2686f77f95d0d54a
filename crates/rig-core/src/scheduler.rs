//! Frame scheduling seam.
//!
//! A [`FrameScheduler`] runs registered callbacks once per host frame until
//! they are cancelled. Everything is single-threaded; receivers are `&self`
//! so a callback may cancel handles (its own included) while it runs.

use std::cell::RefCell;

/// Called once per frame with the host timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnMut(f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Run `callback` every frame, starting with the next one.
    fn start(&self, callback: FrameCallback) -> FrameHandle;

    /// Stop a callback. Idempotent; once this returns the callback is never
    /// invoked again.
    fn cancel(&self, handle: FrameHandle);
}

struct Slot {
    handle: FrameHandle,
    // `None` while the callback is being invoked.
    callback: Option<FrameCallback>,
}

#[derive(Default)]
struct ManualInner {
    next_id: u64,
    now_ms: f64,
    frames: u64,
    slots: Vec<Slot>,
}

/// Deterministic scheduler advanced by hand, for driving the rig without a
/// rendering host.
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<ManualInner>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt_ms` and run one frame.
    pub fn tick(&self, dt_ms: f64) {
        let (now_ms, handles) = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms += dt_ms;
            inner.frames += 1;
            let handles: Vec<FrameHandle> = inner.slots.iter().map(|s| s.handle).collect();
            (inner.now_ms, handles)
        };
        // Callbacks started during this frame wait for the next one.
        for handle in handles {
            let Some(mut callback) = self.take_callback(handle) else {
                continue;
            };
            callback(now_ms);
            self.restore_callback(handle, callback);
        }
    }

    pub fn run_frames(&self, frames: usize, dt_ms: f64) {
        for _ in 0..frames {
            self.tick(dt_ms);
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    pub fn frames(&self) -> u64 {
        self.inner.borrow().frames
    }

    pub fn active(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    fn take_callback(&self, handle: FrameHandle) -> Option<FrameCallback> {
        let mut inner = self.inner.borrow_mut();
        inner
            .slots
            .iter_mut()
            .find(|s| s.handle == handle)
            .and_then(|s| s.callback.take())
    }

    // A slot cancelled mid-callback is gone by now, so the callback is
    // dropped here instead of being put back.
    fn restore_callback(&self, handle: FrameHandle, callback: FrameCallback) {
        let mut inner = self.inner.borrow_mut();
        if let Some(slot) = inner.slots.iter_mut().find(|s| s.handle == handle) {
            slot.callback = Some(callback);
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&self, callback: FrameCallback) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = FrameHandle(inner.next_id);
        inner.next_id += 1;
        inner.slots.push(Slot {
            handle,
            callback: Some(callback),
        });
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.inner.borrow_mut().slots.retain(|s| s.handle != handle);
    }
}
