use std::cell::RefCell;
use std::panic;

use wasm_bindgen::prelude::*;


pub type JsResult<T> = Result<T, JsValue>;

// Single-threaded, so a `thread_local!` is the whole story.
thread_local! {
    static LAST_PANIC: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Error)]
    type JsError;
    #[wasm_bindgen(constructor, js_class = "Error")]
    fn new() -> JsError;
    #[wasm_bindgen(structural, method, getter)]
    fn stack(error: &JsError) -> String;
}

// Panics go to the developer console as usual and are also kept so that the page can show
// them next to the board: a panicked client stops reconciling silently otherwise.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        console_error_panic_hook::hook(panic_info);
        let report = format!("{panic_info}\n\nStack:\n{}", JsError::new().stack());
        LAST_PANIC.with(|cell| *cell.borrow_mut() = Some(report));
    }));
}

// Empty string if the client never panicked.
#[wasm_bindgen]
pub fn last_panic() -> String {
    LAST_PANIC.with(|cell| cell.borrow().clone().unwrap_or_default())
}

#[wasm_bindgen(getter_with_clone)]
pub struct RustError {
    pub message: String,
}

#[macro_export]
macro_rules! rust_error {
    ($($arg:tt)*) => {
        wasm_bindgen::JsValue::from(
            $crate::web_error_handling::RustError{ message: format!($($arg)*) }
        )
    };
}
