use crate::dom;
use instant::Instant;
use rig_core::{PointerSample, Viewport};
use web_sys as web;

/// What pointer coordinates are normalized against.
#[derive(Clone)]
pub enum Surface {
    /// The whole window; `clientX`/`clientY` are used as is.
    Window(web::Window),
    /// An element's bounding box; coordinates are made relative to it.
    Element(web::Element),
}

impl Surface {
    pub fn event_target(&self) -> web::EventTarget {
        match self {
            Surface::Window(w) => w.clone().into(),
            Surface::Element(el) => el.clone().into(),
        }
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_sample(
    ev: &web::MouseEvent,
    surface: &Surface,
    epoch: Instant,
) -> (PointerSample, Viewport) {
    let time_ms = epoch.elapsed().as_secs_f64() * 1000.0;
    let cx = ev.client_x() as f32;
    let cy = ev.client_y() as f32;
    match surface {
        Surface::Window(w) => {
            let (width, height) = dom::window_inner_size(w);
            (
                PointerSample {
                    client_x: cx,
                    client_y: cy,
                    time_ms,
                },
                Viewport::new(width, height),
            )
        }
        Surface::Element(el) => {
            let rect = el.get_bounding_client_rect();
            (
                PointerSample {
                    client_x: cx - rect.left() as f32,
                    client_y: cy - rect.top() as f32,
                    time_ms,
                },
                Viewport::new(rect.width() as f32, rect.height() as f32),
            )
        }
    }
}
