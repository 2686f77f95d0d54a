use crate::input::{self, Surface};
use instant::Instant;
use rig_core::{InputListener, PointerFeed};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const POINTER_MOVE: &str = "pointermove";

/// `pointermove` subscription feeding a rig session.
pub struct PointerListener {
    target: web::EventTarget,
    closure: Option<Closure<dyn FnMut(web::PointerEvent)>>,
}

impl PointerListener {
    pub fn attach(surface: &Surface, feed: PointerFeed, epoch: Instant) -> Self {
        let target = surface.event_target();
        let surface = surface.clone();

        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (sample, viewport) = input::pointer_sample(&ev, &surface, epoch);
            _ = feed.push(sample, viewport);
        }) as Box<dyn FnMut(_)>);

        if let Err(e) =
            target.add_event_listener_with_callback(POINTER_MOVE, closure.as_ref().unchecked_ref())
        {
            log::error!("[pointer] addEventListener failed: {:?}", e);
        }

        Self {
            target,
            closure: Some(closure),
        }
    }
}

impl InputListener for PointerListener {
    fn detach(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(POINTER_MOVE, closure.as_ref().unchecked_ref());
            log::debug!("[pointer] listener removed");
        }
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        self.detach();
    }
}
