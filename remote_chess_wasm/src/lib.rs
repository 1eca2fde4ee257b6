// Browser front end. All JS-facing entry points live on `WebClient`; everything else is plumbing
// between the DOM and `remote_chess::client::ClientSession`.
//
// Improvement potential. Render the board ourselves instead of depending on chessboard.js.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod fetch_transport;
pub mod table;
pub mod web_board;
pub mod web_document;
pub mod web_error_handling;

use std::future::Future;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

use remote_chess::client::{ClientSession, NotableEvent};
use remote_chess::config::ClientOptions;
use remote_chess::coord::Coord;
use remote_chess::force::Force;
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{js_sys, spawn_local};

use crate::fetch_transport::FetchTransport;
use crate::web_board::{Chessboard, WebBoard, WebStatusPanel};
use crate::web_document::web_document;
use crate::web_error_handling::{JsResult, install_panic_hook};


fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        install_panic_hook();
        _ = console_log::init_with_level(log::Level::Debug);
    });
}

// Chessboard.js reports "offboard" when a piece is dropped outside of the board.
fn parse_square(square: &str) -> Option<Coord> {
    let coord = square.parse().ok();
    if coord.is_none() {
        log::debug!("Ignoring non-square \"{square}\"");
    }
    coord
}

fn parse_force(color: &str) -> JsResult<Force> {
    color.parse().map_err(|_| rust_error!("Invalid color: \"{}\"", color))
}

#[wasm_bindgen]
pub struct JsEventStatusChanged {
    status: String,
}
#[wasm_bindgen]
impl JsEventStatusChanged {
    pub fn status(&self) -> String { self.status.clone() }
}

#[wasm_bindgen]
pub struct JsEventGameOver {
    status: String,
}
#[wasm_bindgen]
impl JsEventGameOver {
    pub fn status(&self) -> String { self.status.clone() }
}

#[wasm_bindgen]
pub struct WebClient {
    session: Rc<ClientSession>,
}

impl WebClient {
    fn spawn<F, Fut>(&self, f: F)
    where
        F: FnOnce(Rc<ClientSession>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(f(Rc::clone(&self.session)));
    }
}

#[wasm_bindgen]
impl WebClient {
    // `base_url` and `poll_interval_ms` fall back to the defaults when absent.
    pub fn new_client(
        board: Chessboard, base_url: Option<String>, poll_interval_ms: Option<u32>,
    ) -> JsResult<WebClient> {
        init_logging();
        let mut options = ClientOptions::default();
        if let Some(base_url) = base_url {
            options.base_url =
                Url::parse(&base_url).map_err(|err| rust_error!("Invalid base URL \"{}\": {}", base_url, err))?;
        }
        if let Some(ms) = poll_interval_ms {
            options.poll_interval = Duration::from_millis(ms.into());
        }
        let document = web_document()?;
        let panel = WebStatusPanel::new(&document)?;
        let board = WebBoard::new(board, document);
        let session =
            ClientSession::new(options, Box::new(FetchTransport), Box::new(board), Box::new(panel))
                .map_err(|err| rust_error!("{}", err))?;
        Ok(WebClient { session: Rc::new(session) })
    }

    // Reconciles right away and then on every tick, for the lifetime of the page.
    pub fn start_polling(&self) -> JsResult<()> {
        let window = web_sys::window().ok_or_else(|| rust_error!("Cannot find window"))?;
        let interval_ms = i32::try_from(self.session.options().poll_interval.as_millis())
            .map_err(|_| rust_error!("Poll interval is too long"))?;
        self.spawn(move |session| async move { session.reconcile().await });
        let session = Rc::clone(&self.session);
        let tick = Closure::wrap(Box::new(move || {
            let session = Rc::clone(&session);
            spawn_local(async move { session.reconcile().await });
        }) as Box<dyn FnMut()>);
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            interval_ms,
        )?;
        // The timer is never cancelled.
        tick.forget();
        log::info!("Polling {} every {} ms", self.session.options().base_url, interval_ms);
        Ok(())
    }

    pub fn mouseover(&self, square: &str) {
        if let Some(coord) = parse_square(square) {
            self.spawn(move |session| async move { session.mouseover(coord).await });
        }
    }

    pub fn mouseout(&self) { self.session.mouseout(); }

    pub fn drop_piece(&self, source: &str, target: &str) {
        let (Some(from), Some(to)) = (parse_square(source), parse_square(target)) else {
            self.session.mouseout();
            return;
        };
        self.spawn(move |session| async move { session.drop_piece(from, to).await });
    }

    pub fn reset(&self) { self.spawn(move |session| async move { session.reset().await }); }
    pub fn undo(&self) { self.spawn(move |session| async move { session.undo().await }); }
    pub fn redo(&self) { self.spawn(move |session| async move { session.redo().await }); }
    pub fn autoplay_step(&self) { self.spawn(move |session| async move { session.autoplay_step().await }); }
    pub fn computer_move(&self) { self.spawn(move |session| async move { session.computer_move().await }); }

    pub fn toggle_autoplay(&self, color: &str) -> JsResult<()> {
        let force = parse_force(color)?;
        self.spawn(move |session| async move { session.toggle_autoplay(force).await });
        Ok(())
    }

    pub fn random_move(&self, color: &str) -> JsResult<()> {
        let force = parse_force(color)?;
        self.spawn(move |session| async move { session.request_random_move(force).await });
        Ok(())
    }

    pub fn import_fen(&self, fen: String) {
        if fen.trim().is_empty() {
            return;
        }
        self.spawn(move |session| async move { session.import_fen(&fen).await });
    }

    pub fn set_time_limit(&self, ms: u32) {
        let limit = Duration::from_millis(ms.into());
        self.spawn(move |session| async move { session.set_time_limit(limit).await });
    }

    pub fn choose_color(&self, color: &str) -> JsResult<()> {
        self.session.choose_force(parse_force(color)?);
        Ok(())
    }

    pub fn computer_color(&self) -> String { self.session.computer_force().to_wire().to_owned() }

    // Resolves to the PGN string, or to `undefined` if it could not be fetched.
    pub fn fetch_pgn(&self) -> js_sys::Promise {
        let session = Rc::clone(&self.session);
        wasm_bindgen_futures::future_to_promise(async move {
            Ok(session.fetch_pgn().await.map_or(JsValue::UNDEFINED, JsValue::from))
        })
    }

    pub fn next_notable_event(&self) -> JsValue {
        match self.session.next_notable_event() {
            None => JsValue::NULL,
            Some(NotableEvent::StatusChanged(status)) => {
                JsEventStatusChanged { status: status.to_string() }.into()
            }
            Some(NotableEvent::GameOver(status)) => JsEventGameOver { status: status.to_string() }.into(),
        }
    }
}
