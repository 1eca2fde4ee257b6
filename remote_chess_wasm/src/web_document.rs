use crate::rust_error;
use crate::web_error_handling::JsResult;


#[derive(Clone)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn get_existing_element_by_id(&self, element_id: &str) -> JsResult<web_sys::Element> {
        let element = self
            .0
            .get_element_by_id(element_id)
            .ok_or_else(|| rust_error!("Cannot find element \"{}\"", element_id))?;
        if !element.is_object() {
            return Err(rust_error!("Element \"{}\" is not an object", element_id));
        }
        Ok(element)
    }

    // Chessboard.js rebuilds its DOM on every `position()` call, so the elements it owns are
    // looked up anew each time and may legitimately be missing.
    pub fn query_selector(&self, selectors: &str) -> JsResult<Option<web_sys::Element>> {
        self.0.query_selector(selectors)
    }

    pub fn query_selector_html(&self, selectors: &str) -> JsResult<Option<web_sys::HtmlElement>> {
        use wasm_bindgen::JsCast;
        Ok(self.query_selector(selectors)?.and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok()))
    }
}

pub fn web_document() -> JsResult<WebDocument> {
    let window = web_sys::window().ok_or_else(|| rust_error!("Cannot find window"))?;
    let document = window.document().ok_or_else(|| rust_error!("Cannot find document"))?;
    Ok(WebDocument(document))
}
