use async_trait::async_trait;
use remote_chess::error::RequestError;
use remote_chess::transport::{HttpMethod, HttpResponse, Transport};
use url::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::rust_error;
use crate::web_error_handling::JsResult;


// Browser `fetch`. Rejections (network errors, CORS) become `RequestError::Network`; any
// response, whatever its status, is handed over as is.
pub struct FetchTransport;

async fn fetch(method: HttpMethod, url: &Url) -> JsResult<HttpResponse> {
    let window = web_sys::window().ok_or_else(|| rust_error!("Cannot find window"))?;
    let init = web_sys::RequestInit::new();
    init.set_method(method.as_str());
    let request = web_sys::Request::new_with_str_and_init(url.as_str(), &init)?;
    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_request(&request)).await?.dyn_into()?;
    let status = response.status();
    let body = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
    Ok(HttpResponse { status, body })
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse, RequestError> {
        fetch(method, url).await.map_err(|err| RequestError::Network(format!("{err:?}")))
    }
}
