#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rig_core::{CameraPose, RigOptions, RigSession};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;

use events::PointerListener;
use frame::RafScheduler;
use input::Surface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rig-web starting");
    Ok(())
}

fn to_js_error(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Pointer-driven parallax camera for a page's renderer.
///
/// ```js
/// const cam = new ParallaxCamera("app-canvas", '{"sensitivity":0.3}', (pose) => {
///   camera.position.set(pose[0], pose[1], pose[2]);
///   camera.lookAt(pose[3], pose[4], pose[5]);
/// });
/// cam.activate();
/// ```
#[wasm_bindgen]
pub struct ParallaxCamera {
    session: RigSession<RafScheduler>,
    surface: Surface,
    on_pose: js_sys::Function,
    epoch: Instant,
}

impl ParallaxCamera {
    fn build(
        element_id: Option<&str>,
        options_json: Option<&str>,
        on_pose: js_sys::Function,
    ) -> anyhow::Result<Self> {
        let options = match options_json {
            Some(json) => RigOptions::from_json(json)?,
            None => RigOptions::default(),
        };
        let surface = match element_id {
            Some(id) => Surface::Element(dom::element_by_id(id)?),
            None => Surface::Window(web::window().ok_or_else(|| anyhow::anyhow!("no window"))?),
        };
        let scheduler = Rc::new(RafScheduler::new()?);
        log::info!("[camera] options {:?}", options);
        Ok(Self {
            session: RigSession::new(scheduler, options)?,
            surface,
            on_pose,
            epoch: Instant::now(),
        })
    }
}

#[wasm_bindgen]
impl ParallaxCamera {
    /// `element_id` selects the element pointer positions are normalized
    /// against (the window when omitted). `options_json` is an optional JSON
    /// object of rig options. `on_pose` receives a `Float32Array`
    /// `[px, py, pz, lx, ly, lz]` every frame while active.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: Option<String>,
        options_json: Option<String>,
        on_pose: js_sys::Function,
    ) -> Result<ParallaxCamera, JsValue> {
        Self::build(element_id.as_deref(), options_json.as_deref(), on_pose).map_err(to_js_error)
    }

    pub fn activate(&mut self) {
        let surface = self.surface.clone();
        let epoch = self.epoch;
        let on_pose = self.on_pose.clone();
        self.session.activate(
            move |feed| PointerListener::attach(&surface, feed, epoch),
            move |pose: &CameraPose| {
                let arr = js_sys::Float32Array::from(&pose.to_array()[..]);
                if let Err(e) = on_pose.call1(&JsValue::NULL, &arr) {
                    log::error!("[camera] onPose threw: {:?}", e);
                }
            },
        );
    }

    pub fn deactivate(&mut self) {
        self.session.deactivate();
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.session.is_active()
    }

    /// Current `[px, py, pz, lx, ly, lz]`, or `undefined` when inactive.
    pub fn pose(&self) -> Option<Vec<f32>> {
        self.session.pose().map(|p| p.to_array().to_vec())
    }

    /// Column-major view matrix of the current pose.
    #[wasm_bindgen(js_name = viewMatrix)]
    pub fn view_matrix(&self) -> Option<Vec<f32>> {
        self.session
            .pose()
            .map(|p| p.view_matrix().to_cols_array().to_vec())
    }
}
