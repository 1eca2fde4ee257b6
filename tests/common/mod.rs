// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_std::channel;
use async_trait::async_trait;
use enum_map::EnumMap;
use remote_chess::client::ClientSession;
use remote_chess::config::ClientOptions;
use remote_chess::coord::Coord;
use remote_chess::error::RequestError;
use remote_chess::force::Force;
use remote_chess::grid::Grid;
use remote_chess::status::ScoreTable;
use remote_chess::transport::{HttpMethod, HttpResponse, Transport};
use remote_chess::view::{BoardWidget, KingGlow, SquareBackground, StatusPanel};
use url::Url;


pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
pub const AFTER_E4_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR";

#[allow(dead_code)]
pub fn sq(s: &str) -> Coord { s.parse().unwrap() }

#[allow(dead_code)]
pub fn board_json(placement: &str) -> String { format!(r#"{{"renderBoard": "{placement}"}}"#) }

#[allow(dead_code)]
pub fn state_json(state: &str) -> String {
    format!(r#"{{"move": null, "score": 0, "gameState": {{"state": "{state}"}}}}"#)
}

#[allow(dead_code)]
pub fn state_json_with_last_move(state: &str, last_move: &str) -> String {
    format!(
        r#"{{"move": null, "score": 0, "lastMove": "{last_move}", "gameState": {{"state": "{state}"}}}}"#
    )
}


// Blocks a scripted response until released (or until the gate is dropped).
pub struct Gate(channel::Sender<()>);

impl Gate {
    #[allow(dead_code)]
    pub fn release(self) { let _ = self.0.try_send(()); }
}

struct ScriptedResponse {
    response: Result<HttpResponse, RequestError>,
    gate: Option<channel::Receiver<()>>,
}

#[derive(Default)]
struct FakeServerState {
    // Returned every time, unless a one-shot response is queued.
    sticky: HashMap<String, Result<HttpResponse, RequestError>>,
    one_shot: HashMap<String, VecDeque<ScriptedResponse>>,
    log: Vec<String>,
}

// Scripted remote authority. Requests are keyed as "METHOD /path?query" relative to the base
// URL, e.g. "GET /figure/frontend" or "PATCH /figure/move/e2/e4".
#[derive(Clone, Default)]
pub struct FakeServer {
    state: Rc<RefCell<FakeServerState>>,
}

#[allow(dead_code)]
impl FakeServer {
    pub fn new() -> Self { Self::default() }

    // Standard game in the starting position.
    pub fn with_starting_position() -> Self {
        let server = FakeServer::new();
        server.set("GET /figure/frontend", &board_json(STARTING_PLACEMENT));
        server.set("GET /state", &state_json("PLAY"));
        server
    }

    pub fn set(&self, key: &str, body: &str) { self.set_status(key, 200, body); }

    pub fn set_status(&self, key: &str, status: u16, body: &str) {
        let response = HttpResponse { status, body: body.to_owned() };
        self.state.borrow_mut().sticky.insert(key.to_owned(), Ok(response));
    }

    pub fn set_network_error(&self, key: &str) {
        let err = RequestError::Network("connection refused".to_owned());
        self.state.borrow_mut().sticky.insert(key.to_owned(), Err(err));
    }

    pub fn hold_once(&self, key: &str, body: &str) -> Gate {
        let (tx, rx) = channel::bounded(1);
        let response = HttpResponse { status: 200, body: body.to_owned() };
        self.state
            .borrow_mut()
            .one_shot
            .entry(key.to_owned())
            .or_default()
            .push_back(ScriptedResponse { response: Ok(response), gate: Some(rx) });
        Gate(tx)
    }

    pub fn log(&self) -> Vec<String> { self.state.borrow().log.clone() }
    pub fn take_log(&self) -> Vec<String> { std::mem::take(&mut self.state.borrow_mut().log) }
}

fn request_key(method: HttpMethod, url: &Url) -> String {
    let path = url.path().strip_prefix("/chess").unwrap_or(url.path());
    match url.query() {
        Some(query) => format!("{method} {path}?{query}"),
        None => format!("{method} {path}"),
    }
}

#[async_trait(?Send)]
impl Transport for FakeServer {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<HttpResponse, RequestError> {
        let key = request_key(method, url);
        let scripted = {
            let mut state = self.state.borrow_mut();
            state.log.push(key.clone());
            let one_shot = state.one_shot.get_mut(&key).and_then(|queue| queue.pop_front());
            match one_shot {
                Some(scripted) => scripted,
                None => ScriptedResponse {
                    response: state.sticky.get(&key).cloned().unwrap_or(Ok(HttpResponse {
                        status: 404,
                        body: String::new(),
                    })),
                    gate: None,
                },
            }
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.recv().await;
        }
        scripted.response
    }
}


#[derive(Clone, PartialEq, Debug, Default)]
pub struct ViewState {
    pub grid: Option<Grid>,
    pub position_calls: usize,
    pub orientation: Option<Force>,
    pub backgrounds: HashMap<Coord, SquareBackground>,
    pub glow: EnumMap<Force, KingGlow>,
    pub last_move: Option<(Option<Coord>, bool)>,
    pub last_move_calls: usize,
    pub header: String,
    pub header_history: Vec<String>,
    pub calculated_line: String,
    pub score: String,
    pub details: ScoreTable,
}

// Board widget and status panel in one, remembering everything shown.
#[derive(Clone, Default)]
pub struct RecordingView {
    state: Rc<RefCell<ViewState>>,
}

#[allow(dead_code)]
impl RecordingView {
    pub fn new() -> Self { Self::default() }
    pub fn snapshot(&self) -> ViewState { self.state.borrow().clone() }

    // Everything except call counters: what the user actually sees.
    pub fn visible(&self) -> ViewState {
        ViewState {
            position_calls: 0,
            last_move_calls: 0,
            header_history: Vec::new(),
            ..self.snapshot()
        }
    }
}

impl BoardWidget for RecordingView {
    fn position(&mut self, grid: &Grid) {
        let mut state = self.state.borrow_mut();
        state.grid = Some(grid.clone());
        state.position_calls += 1;
    }
    fn orientation(&mut self, force: Force) { self.state.borrow_mut().orientation = Some(force); }
    fn set_square_background(&mut self, coord: Coord, background: Option<SquareBackground>) {
        let mut state = self.state.borrow_mut();
        match background {
            Some(background) => state.backgrounds.insert(coord, background),
            None => state.backgrounds.remove(&coord),
        };
    }
    fn set_king_glow(&mut self, force: Force, glow: KingGlow) {
        self.state.borrow_mut().glow[force] = glow;
    }
    fn set_last_move(&mut self, to: Option<Coord>, is_opening: bool) {
        let mut state = self.state.borrow_mut();
        state.last_move = Some((to, is_opening));
        state.last_move_calls += 1;
    }
}

impl StatusPanel for RecordingView {
    fn set_header(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.header = text.to_owned();
        state.header_history.push(text.to_owned());
    }
    fn set_calculated_line(&mut self, text: &str) {
        self.state.borrow_mut().calculated_line = text.to_owned();
    }
    fn set_score(&mut self, text: &str) { self.state.borrow_mut().score = text.to_owned(); }
    fn set_details(&mut self, table: &ScoreTable) { self.state.borrow_mut().details = table.clone(); }
}

#[allow(dead_code)]
pub fn new_session(server: &FakeServer, view: &RecordingView) -> ClientSession {
    new_session_with_options(server, view, ClientOptions::default())
}

#[allow(dead_code)]
pub fn new_session_with_options(
    server: &FakeServer, view: &RecordingView, options: ClientOptions,
) -> ClientSession {
    ClientSession::new(
        options,
        Box::new(server.clone()),
        Box::new(view.clone()),
        Box::new(view.clone()),
    )
    .unwrap()
}
