use fnv::FnvHashMap;
use rig_core::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// One self-rescheduling requestAnimationFrame chain.
struct RafLoop {
    callback: RefCell<Option<FrameCallback>>,
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    raf_id: Cell<Option<i32>>,
    cancelled: Cell<bool>,
}

impl RafLoop {
    fn request(&self, window: &web::Window) {
        let slot = self.closure.borrow();
        let Some(closure) = slot.as_ref() else {
            return;
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn run(&self, window: &web::Window, now_ms: f64) {
        self.raf_id.set(None);
        if self.cancelled.get() {
            return;
        }
        // Taken out while running so the callback may cancel this loop.
        let Some(mut callback) = self.callback.borrow_mut().take() else {
            return;
        };
        callback(now_ms);
        if self.cancelled.get() {
            return;
        }
        *self.callback.borrow_mut() = Some(callback);
        self.request(window);
    }
}

/// [`FrameScheduler`] backed by the browser's requestAnimationFrame.
pub struct RafScheduler {
    window: web::Window,
    next_id: Cell<u64>,
    loops: RefCell<FnvHashMap<FrameHandle, Rc<RafLoop>>>,
}

impl RafScheduler {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Ok(Self {
            window,
            next_id: Cell::new(0),
            loops: RefCell::new(FnvHashMap::default()),
        })
    }
}

impl FrameScheduler for RafScheduler {
    fn start(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);

        let raf = Rc::new(RafLoop {
            callback: RefCell::new(Some(callback)),
            closure: RefCell::new(None),
            raf_id: Cell::new(None),
            cancelled: Cell::new(false),
        });
        let weak: Weak<RafLoop> = Rc::downgrade(&raf);
        let window = self.window.clone();
        *raf.closure.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            if let Some(raf) = weak.upgrade() {
                raf.run(&window, now_ms);
            }
        }) as Box<dyn FnMut(f64)>));

        raf.request(&self.window);
        self.loops.borrow_mut().insert(handle, raf);
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        let Some(raf) = self.loops.borrow_mut().remove(&handle) else {
            return;
        };
        raf.cancelled.set(true);
        if let Some(id) = raf.raf_id.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        raf.callback.borrow_mut().take();
        // The JS closure may be on the stack right now (cancel from inside a
        // frame); release it once the current task has unwound.
        let closure = raf.closure.borrow_mut().take();
        spawn_local(async move {
            drop(closure);
        });
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        let handles: Vec<FrameHandle> = self.loops.borrow().keys().copied().collect();
        for handle in handles {
            self.cancel(handle);
        }
    }
}
