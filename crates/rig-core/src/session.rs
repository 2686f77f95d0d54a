//! Activation lifecycle.
//!
//! Activation builds a fresh [`Rig`], hands the host a [`PointerFeed`] to
//! attach its input listener to, and starts a frame callback that publishes
//! the camera pose every tick. Deactivation detaches the listener, cancels
//! the frame callback and drops the rig, in that order.

use crate::camera::CameraPose;
use crate::config::RigOptions;
use crate::error::ConfigError;
use crate::rig::Rig;
use crate::sampler::{PointerSample, RawSample, Viewport};
use crate::scheduler::{FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Host-side input subscription owned by a session.
pub trait InputListener {
    /// Stop delivering events. Called exactly once, before the frame
    /// callback is cancelled.
    fn detach(&mut self);
}

/// Write end of the raw sample store. Becomes inert once the session that
/// issued it deactivates.
#[derive(Clone)]
pub struct PointerFeed {
    rig: Weak<RefCell<Rig>>,
}

impl PointerFeed {
    /// Returns the stored raw sample, or `None` if the session is gone.
    pub fn push(&self, event: PointerSample, viewport: Viewport) -> Option<RawSample> {
        let rig = self.rig.upgrade()?;
        let raw = rig.borrow_mut().on_pointer(event, viewport);
        Some(raw)
    }

    pub fn is_live(&self) -> bool {
        self.rig.strong_count() > 0
    }
}

struct Active {
    listener: Box<dyn InputListener>,
    handle: FrameHandle,
    rig: Rc<RefCell<Rig>>,
}

pub struct RigSession<S: FrameScheduler> {
    scheduler: Rc<S>,
    options: RigOptions,
    active: Option<Active>,
}

impl<S: FrameScheduler> RigSession<S> {
    /// Fails if `options` would break the factor or finiteness invariants;
    /// every rig this session builds uses them as is.
    pub fn new(scheduler: Rc<S>, options: RigOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            scheduler,
            options,
            active: None,
        })
    }

    pub fn options(&self) -> &RigOptions {
        &self.options
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start the rig. `attach` receives the feed for the host's pointer
    /// events and returns the listener to detach later; `on_pose` gets the
    /// camera pose once per frame. An already active session is torn down
    /// first.
    pub fn activate<L, A, F>(&mut self, attach: A, mut on_pose: F)
    where
        L: InputListener + 'static,
        A: FnOnce(PointerFeed) -> L,
        F: FnMut(&CameraPose) + 'static,
    {
        if self.is_active() {
            log::warn!("[session] activate while active; restarting");
            self.deactivate();
        }

        let rig = Rc::new(RefCell::new(Rig::new(&self.options)));
        let listener = attach(PointerFeed {
            rig: Rc::downgrade(&rig),
        });

        let weak = Rc::downgrade(&rig);
        let handle = self.scheduler.start(Box::new(move |_now_ms: f64| {
            let Some(rig) = weak.upgrade() else {
                return;
            };
            let pose = rig.borrow_mut().frame();
            drop(rig);
            on_pose(&pose);
        }));

        log::info!("[session] activated (frame handle {})", handle.0);
        self.active = Some(Active {
            listener: Box::new(listener),
            handle,
            rig,
        });
    }

    pub fn deactivate(&mut self) {
        let Some(Active {
            mut listener,
            handle,
            rig,
        }) = self.active.take()
        else {
            return;
        };
        listener.detach();
        self.scheduler.cancel(handle);
        let frames = rig.borrow().frames();
        drop(rig);
        log::info!("[session] deactivated after {} frames", frames);
    }

    /// Latest camera pose while active.
    pub fn pose(&self) -> Option<CameraPose> {
        self.active.as_ref().map(|a| a.rig.borrow().pose())
    }

    /// Snapshot of the running rig while active.
    pub fn rig(&self) -> Option<Rig> {
        self.active.as_ref().map(|a| a.rig.borrow().clone())
    }
}

impl<S: FrameScheduler> Drop for RigSession<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
