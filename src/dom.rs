use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up an element by id, failing with the id in the message.
pub fn element_by_id(element_id: &str) -> anyhow::Result<web::Element> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", element_id))
}

/// Inner size of the window in CSS pixels, or zero when unavailable.
pub fn window_inner_size(window: &web::Window) -> (f32, f32) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (read(window.inner_width()), read(window.inner_height()))
}
