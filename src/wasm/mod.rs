//! WASM bindings for the planner
//!
//! Two surfaces: pure methods on [`WasmPlanner`] for hosts that drive events
//! themselves, and [`attach_url_input`], which wires the address bar behavior
//! directly onto a live DOM input element.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent};

use crate::address::{parse_address, read_target, INVALID_CLASS};
use crate::input::{Key, KeyEvent};
use crate::schedule::BlockKind;
use crate::Planner;

/// Initialize panic hook and console logging for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Trace).expect("error initializing log");
}

/// WASM-exposed planner wrapper
#[wasm_bindgen]
pub struct WasmPlanner {
    planner: Planner,
}

#[wasm_bindgen]
impl WasmPlanner {
    /// Create a planner with an empty day
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            planner: Planner::new(),
        }
    }

    /// Handle a key-down against the address field's current text.
    ///
    /// Returns the navigation href, or `null` when nothing should happen.
    /// The host is responsible for the actual `location.href` assignment
    /// (or can use [`attach_url_input`] to have it done automatically).
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, key_code: u32, value: &str) -> Option<String> {
        let event = KeyEvent::from_dom(key, key_code);
        self.planner
            .handle_key(&event, value)
            .map(|nav| nav.href().to_string())
    }

    /// Whether the address field should carry the invalid marker class
    #[wasm_bindgen(js_name = isInvalid)]
    pub fn is_invalid(&self) -> bool {
        self.planner.address_bar.validity().is_invalid()
    }

    /// Inline validation message, or `null` while the field is valid
    #[wasm_bindgen(js_name = validationMessage)]
    pub fn validation_message(&self) -> Option<String> {
        self.planner
            .address_bar
            .notice()
            .map(|notice| notice.message)
    }

    /// Add a block to the day; returns its id
    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&mut self, start_minute: u32, end_minute: u32, busy: bool) -> u64 {
        let kind = if busy {
            BlockKind::Busy
        } else {
            BlockKind::Available
        };
        self.planner.add_block(start_minute, end_minute, kind).0
    }

    /// Start dragging a block
    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, id: u64, pointer_y: f64) -> bool {
        self.planner.begin_drag(crate::BlockId(id), pointer_y)
    }

    /// Move the drag ghost to follow the pointer
    #[wasm_bindgen(js_name = dragTo)]
    pub fn drag_to(&mut self, pointer_y: f64) {
        self.planner.drag_to(pointer_y);
    }

    /// Drop the dragged block at the ghost position
    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) -> bool {
        self.planner.end_drag()
    }

    /// Abandon the drag without moving anything
    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) {
        self.planner.cancel_drag();
    }

    /// Render data for the day column as a JSON string
    #[wasm_bindgen(js_name = getRenderData)]
    pub fn get_render_data(&mut self) -> String {
        serde_json::to_string(&self.planner.render_data()).unwrap_or_default()
    }

    /// Block geometry as a flat array, `[left, top, width, height]` per
    /// block in render order. Cheaper than JSON for per-frame reads.
    #[wasm_bindgen(js_name = getGeometry)]
    pub fn get_geometry(&mut self) -> js_sys::Float64Array {
        let data = self.planner.render_data();
        let mut flat = Vec::with_capacity(data.blocks.len() * 4);
        for block in &data.blocks {
            flat.extend_from_slice(&[block.left, block.top, block.width, block.height]);
        }
        js_sys::Float64Array::from(flat.as_slice())
    }
}

impl Default for WasmPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach the address bar behavior to a live input element.
///
/// Installs a `keydown` listener that stops propagation on every event and,
/// on Enter, validates the field's text: a well-formed URL clears the
/// `invalid` marker class and navigates to the reader route; anything else
/// adds the marker class and nothing more. The field reference is passed in
/// explicitly rather than looked up, so hosts control which element is wired.
#[wasm_bindgen(js_name = attachUrlInput)]
pub fn attach_url_input(input: &HtmlInputElement) -> Result<(), JsValue> {
    let field = input.clone();
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        event.stop_propagation();

        if Key::from_dom(&event.key(), event.key_code()) != Key::Enter {
            return;
        }

        match parse_address(&field.value()) {
            Ok(url) => {
                let _ = field.class_list().remove_1(INVALID_CLASS);
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(&read_target(&url));
                }
            }
            Err(_) => {
                let _ = field.class_list().add_1(INVALID_CLASS);
            }
        }
    });

    input.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    // The listener lives for the page's lifetime
    on_keydown.forget();
    Ok(())
}
