// Chessboard.js binding and the DOM status panel.
//
// The page owns the chessboard.js object (created with `Chessboard('board', config)`) and
// forwards its `onMouseoverSquare`, `onMouseoutSquare` and `onDrop` callbacks to `WebClient`.

use remote_chess::coord::Coord;
use remote_chess::fen::grid_to_placement;
use remote_chess::force::Force;
use remote_chess::grid::Grid;
use remote_chess::piece::{PieceKind, PieceOnBoard};
use remote_chess::status::ScoreTable;
use remote_chess::view::{BoardWidget, GlowColor, KingGlow, SquareBackground, StatusPanel};
use wasm_bindgen::prelude::*;

use crate::table::score_table_html;
use crate::web_document::WebDocument;
use crate::web_error_handling::JsResult;


const GLOW_CLASSES: [&str; 2] = ["glow-red", "glow-blue"];
const LAST_MOVE_CLASS: &str = "last-move";
const OPENING_MOVE_CLASS: &str = "opening-move";

#[wasm_bindgen]
extern "C" {
    pub type Chessboard;

    #[wasm_bindgen(method)]
    fn position(this: &Chessboard, position: &str);

    #[wasm_bindgen(method)]
    fn orientation(this: &Chessboard, color: &str);
}

// The CSS class that makes a king glow.
pub fn glow_class(force: Force, glow: KingGlow) -> Option<&'static str> {
    glow.color(force).map(|color| match color {
        GlowColor::Red => "glow-red",
        GlowColor::Blue => "glow-blue",
    })
}

pub fn square_selector(coord: Coord) -> String { format!("#board .square-{coord}") }

pub fn king_selector(force: Force) -> String {
    format!("#board [data-piece=\"{}\"]", PieceOnBoard::new(force, PieceKind::King).to_code())
}

pub struct WebBoard {
    board: Chessboard,
    document: WebDocument,
    last_move: Option<Coord>,
}

impl WebBoard {
    pub fn new(board: Chessboard, document: WebDocument) -> Self {
        WebBoard { board, document, last_move: None }
    }

    fn try_set_square_background(&self, coord: Coord, background: Option<SquareBackground>) -> JsResult<()> {
        let Some(square) = self.document.query_selector_html(&square_selector(coord))? else {
            return Ok(());
        };
        match background {
            Some(background) => square.style().set_property("background", background.css_color())?,
            None => {
                square.style().remove_property("background")?;
            }
        }
        Ok(())
    }

    fn try_set_king_glow(&self, force: Force, glow: KingGlow) -> JsResult<()> {
        // No king on the board is fine: positions can be imported from arbitrary FEN.
        let Some(king) = self.document.query_selector(&king_selector(force))? else {
            return Ok(());
        };
        let class_list = king.class_list();
        for class in GLOW_CLASSES {
            class_list.remove_1(class)?;
        }
        if let Some(class) = glow_class(force, glow) {
            class_list.add_1(class)?;
        }
        Ok(())
    }

    fn try_set_last_move(&mut self, to: Option<Coord>, is_opening: bool) -> JsResult<()> {
        if let Some(previous) = self.last_move.take() {
            if let Some(square) = self.document.query_selector(&square_selector(previous))? {
                square.class_list().remove_2(LAST_MOVE_CLASS, OPENING_MOVE_CLASS)?;
            }
        }
        if let Some(to) = to {
            if let Some(square) = self.document.query_selector(&square_selector(to))? {
                let class = if is_opening { OPENING_MOVE_CLASS } else { LAST_MOVE_CLASS };
                square.class_list().add_1(class)?;
            }
        }
        self.last_move = to;
        Ok(())
    }
}

// Trait methods cannot fail: DOM errors are logged and the view stays as it was.
fn log_dom_error(what: &str, result: JsResult<()>) {
    if let Err(err) = result {
        log::error!("Cannot {what}: {err:?}");
    }
}

impl BoardWidget for WebBoard {
    fn position(&mut self, grid: &Grid) { self.board.position(&grid_to_placement(grid)); }
    fn orientation(&mut self, force: Force) { self.board.orientation(force.to_wire()); }
    fn set_square_background(&mut self, coord: Coord, background: Option<SquareBackground>) {
        log_dom_error("highlight square", self.try_set_square_background(coord, background));
    }
    fn set_king_glow(&mut self, force: Force, glow: KingGlow) {
        log_dom_error("update king glow", self.try_set_king_glow(force, glow));
    }
    fn set_last_move(&mut self, to: Option<Coord>, is_opening: bool) {
        let result = self.try_set_last_move(to, is_opening);
        log_dom_error("mark last move", result);
    }
}

pub struct WebStatusPanel {
    header: web_sys::Element,
    calculated_line: web_sys::Element,
    score: web_sys::Element,
    details: web_sys::Element,
}

impl WebStatusPanel {
    pub fn new(document: &WebDocument) -> JsResult<Self> {
        Ok(WebStatusPanel {
            header: document.get_existing_element_by_id("header")?,
            calculated_line: document.get_existing_element_by_id("calculatedLine")?,
            score: document.get_existing_element_by_id("score")?,
            details: document.get_existing_element_by_id("gameDetails")?,
        })
    }
}

impl StatusPanel for WebStatusPanel {
    fn set_header(&mut self, text: &str) { self.header.set_text_content(Some(text)); }
    fn set_calculated_line(&mut self, text: &str) { self.calculated_line.set_text_content(Some(text)); }
    fn set_score(&mut self, text: &str) { self.score.set_text_content(Some(text)); }
    fn set_details(&mut self, table: &ScoreTable) { self.details.set_inner_html(&score_table_html(table)); }
}
