// Request/response wrapper around the remote chess authority's HTTP API.
//
// The platform-specific part (actually sending bytes) lives behind `Transport`: `reqwest` in
// the console client, `fetch` in the browser, a scripted fake in tests. Everything above it
// (URL construction, status handling, JSON decoding, the swallow-and-log failure policy) is
// shared.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use strum::{Display, IntoStaticStr};
use url::Url;

use crate::coord::Coord;
use crate::error::RequestError;
use crate::force::Force;


pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/chess";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str { self.into() }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

// Sends a single request. Implementations must not retry and must not interpret the status:
// `Err` is reserved for requests that never got a response.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse, RequestError>;
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum EngineMoveKind {
    // Best move according to the engine.
    Intelligent,
    Random,
}

// Every endpoint of the remote authority the client talks to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Endpoint {
    RenderBoard,
    GameState,
    Score,
    PossibleMoves(Coord),
    CommitMove { from: Coord, to: Coord },
    RequestMove { kind: EngineMoveKind, force: Force },
    ToggleAutoplay(Force),
    SetTimeLimit(Duration),
    ImportFen(String),
    Reset,
    Undo,
    Redo,
    AutoplayStep,
    LastMove,
    Pgn,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        use Endpoint::*;
        match self {
            RenderBoard | GameState | Score | PossibleMoves(_) | Undo | Redo | AutoplayStep
            | LastMove | Pgn => HttpMethod::Get,
            CommitMove { .. } | RequestMove { .. } | ToggleAutoplay(_) | SetTimeLimit(_)
            | ImportFen(_) => HttpMethod::Patch,
            Reset => HttpMethod::Put,
        }
    }

    pub fn path_segments(&self) -> Vec<String> {
        use Endpoint::*;
        let segments: Vec<&str> = match self {
            RenderBoard => vec!["figure", "frontend"],
            GameState => vec!["state"],
            Score => vec!["score"],
            PossibleMoves(from) => return strings(["figure", "move", "possible"], [from.to_string()]),
            CommitMove { from, to } => {
                return strings(["figure", "move"], [from.to_string(), to.to_string()]);
            }
            RequestMove { kind, force } => {
                return strings(["figure", "move"], [kind.to_string(), force.to_string()]);
            }
            ToggleAutoplay(force) => return strings(["autoplay"], [force.to_string()]),
            SetTimeLimit(limit) => {
                return strings(["autoplay", "timelimit"], [limit.as_millis().to_string()]);
            }
            ImportFen(_) => vec!["fen"],
            Reset => vec!["reset"],
            Undo => vec!["undo"],
            Redo => vec!["redo"],
            AutoplayStep => vec!["autoplay"],
            LastMove => vec!["autoplay", "lastMove"],
            Pgn => vec!["pgn"],
        };
        segments.into_iter().map(str::to_owned).collect()
    }

    pub fn url(&self, base: &Url) -> Result<Url, RequestError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(self.path_segments());
        if let Endpoint::ImportFen(fen) = self {
            url.query_pairs_mut().append_pair("fen", fen);
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.path_segments().join("/"))
    }
}

fn strings<const N: usize, const M: usize>(fixed: [&str; N], dynamic: [String; M]) -> Vec<String> {
    fixed.into_iter().map(str::to_owned).chain(dynamic).collect()
}


pub struct ApiClient {
    base_url: Url,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: Url, transport: Box<dyn Transport>) -> Result<Self, RequestError> {
        if base_url.cannot_be_a_base() {
            return Err(RequestError::InvalidUrl(base_url.to_string()));
        }
        Ok(ApiClient { base_url, transport })
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    pub async fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, RequestError> {
        let url = endpoint.url(&self.base_url)?;
        log::debug!("{} {}", endpoint.method(), url);
        let response = self.transport.send(endpoint.method(), &url).await?;
        if !response.is_success() {
            return Err(RequestError::Status(response.status));
        }
        // Mutating endpoints answer with an empty body.
        let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    // Request with the client's failure policy applied: errors are logged and swallowed, so that
    // the caller's continuation is simply not run and the UI keeps its last good state.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Option<T> {
        match self.request(endpoint).await {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Request failed: {} ({})", err, endpoint);
                None
            }
        }
    }
}
