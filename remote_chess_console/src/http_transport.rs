use async_trait::async_trait;
use remote_chess::error::RequestError;
use remote_chess::transport::{HttpMethod, HttpResponse, Transport};
use url::Url;


pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self { ReqwestTransport { client: reqwest::Client::new() } }
}

fn network_error(err: reqwest::Error) -> RequestError { RequestError::Network(err.to_string()) }

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse, RequestError> {
        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
        };
        let response =
            self.client.request(method, url.clone()).send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;
        Ok(HttpResponse { status, body })
    }
}
